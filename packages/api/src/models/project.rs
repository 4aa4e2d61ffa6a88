//! Project records (`/projetos`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Ativo,
    Concluido,
    Pausado,
    /// Any status string this client does not know about.
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    /// Statuses a user can pick in the project form.
    pub const SELECTABLE: [ProjectStatus; 3] = [Self::Ativo, Self::Concluido, Self::Pausado];

    /// Wire value, as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativo => "ativo",
            Self::Concluido => "concluido",
            Self::Pausado => "pausado",
            Self::Unknown => "desconhecido",
        }
    }

    /// Human label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ativo => "Ativo",
            Self::Concluido => "Concluído",
            Self::Pausado => "Pausado",
            Self::Unknown => "Desconhecido",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "ativo" => Self::Ativo,
            "concluido" => Self::Concluido,
            "pausado" => Self::Pausado,
            _ => Self::Unknown,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Ativo)
    }
}

/// A project as listed by `GET /projetos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "tipo_projeto", default)]
    pub kind: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(
        rename = "data_inicio",
        default,
        deserialize_with = "super::optional_date::deserialize"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        rename = "data_prevista",
        default,
        deserialize_with = "super::optional_date::deserialize"
    )]
    pub target_date: Option<NaiveDate>,
    #[serde(rename = "valor_estimado", default)]
    pub estimated_value: Option<f64>,
    /// Joined from the users table by the backend; read-only.
    #[serde(rename = "cliente_nome", default)]
    pub client_name: Option<String>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

/// Body of `POST /projetos` and `PUT /projetos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "tipo_projeto")]
    pub kind: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(
        rename = "data_inicio",
        default,
        deserialize_with = "super::optional_date::deserialize"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        rename = "data_prevista",
        default,
        deserialize_with = "super::optional_date::deserialize"
    )]
    pub target_date: Option<NaiveDate>,
    #[serde(rename = "valor_estimado", default)]
    pub estimated_value: Option<f64>,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_backend_row() {
        let project: Project = serde_json::from_str(
            r#"{
                "id": 3,
                "nome": "Galpão",
                "descricao": null,
                "cliente_id": null,
                "tipo_projeto": "obra",
                "status": "pausado",
                "data_inicio": "2024-03-01",
                "data_prevista": "",
                "valor_estimado": 15000.5,
                "observacoes": null,
                "data_criacao": "2024-02-28 10:00:00",
                "cliente_nome": null
            }"#,
        )
        .unwrap();
        assert_eq!(project.status, ProjectStatus::Pausado);
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(project.target_date, None);
        assert_eq!(project.estimated_value, Some(15000.5));
    }

    #[test]
    fn test_unknown_status_is_preserved_as_unknown() {
        let project: Project =
            serde_json::from_str(r#"{"id": 1, "nome": "X", "status": "arquivado"}"#).unwrap();
        assert_eq!(project.status, ProjectStatus::Unknown);
        assert!(!project.status.is_active());
    }

    #[test]
    fn test_payload_sends_nulls_for_empty_optionals() {
        let payload = ProjectPayload {
            name: "Casa".into(),
            description: None,
            kind: "obra".into(),
            status: ProjectStatus::Concluido,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            target_date: None,
            estimated_value: None,
            notes: None,
        };
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["status"], "concluido");
        assert_eq!(body["data_inicio"], "2024-01-15");
        assert!(body["descricao"].is_null());
        assert!(body["valor_estimado"].is_null());
    }
}
