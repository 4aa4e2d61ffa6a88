//! Pre-aggregated dashboard payload (`GET /dashboard`).

use serde::{Deserialize, Serialize};

use super::ProjectStatus;

/// Counters and recent projects, computed by the backend in one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(rename = "total_projetos", default)]
    pub total_projects: u64,
    #[serde(rename = "projetos_ativos", default)]
    pub active_projects: u64,
    #[serde(rename = "total_materiais", default)]
    pub total_materials: u64,
    #[serde(rename = "projetos_recentes", default)]
    pub recent_projects: Vec<RecentProject>,
}

/// Row of the "recent projects" table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentProject {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(rename = "cliente_nome", default)]
    pub client_name: Option<String>,
    #[serde(rename = "valor_estimado", default)]
    pub estimated_value: Option<f64>,
}

/// Number of projects the backend includes in `projetos_recentes`.
pub const RECENT_LIMIT: usize = 5;
