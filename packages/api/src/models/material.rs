//! Material records (`/materiais`).

use serde::{Deserialize, Serialize};

/// Unit of measure the backend assumes when none is given.
pub const DEFAULT_UNIT: &str = "un";

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

/// A material as listed by `GET /materiais`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo_material", default)]
    pub kind: String,
    #[serde(rename = "especificacoes", default)]
    pub specification: Option<String>,
    #[serde(rename = "preco_unitario", default)]
    pub unit_price: Option<f64>,
    #[serde(rename = "estoque_atual", default)]
    pub stock: i64,
    #[serde(rename = "unidade_medida", default = "default_unit")]
    pub unit: String,
    #[serde(rename = "fornecedor", default)]
    pub supplier: Option<String>,
}

/// Body of `POST /materiais` and `PUT /materiais/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo_material")]
    pub kind: String,
    #[serde(rename = "especificacoes", default)]
    pub specification: Option<String>,
    #[serde(rename = "preco_unitario", default)]
    pub unit_price: Option<f64>,
    #[serde(rename = "estoque_atual", default)]
    pub stock: i64,
    #[serde(rename = "unidade_medida", default = "default_unit")]
    pub unit: String,
    #[serde(rename = "fornecedor", default)]
    pub supplier: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_create_body_decodes_with_defaults() {
        let payload: MaterialPayload = serde_json::from_str(
            r#"{"nome": "Cabo 10mm", "tipo_material": "elétrico", "estoque_atual": 5, "unidade_medida": "m"}"#,
        )
        .unwrap();
        assert_eq!(payload.name, "Cabo 10mm");
        assert_eq!(payload.stock, 5);
        assert_eq!(payload.unit, "m");
        assert_eq!(payload.unit_price, None);
    }

    #[test]
    fn test_missing_unit_falls_back_to_un() {
        let material: Material =
            serde_json::from_str(r#"{"id": 2, "nome": "Tijolo", "tipo_material": "alvenaria"}"#)
                .unwrap();
        assert_eq!(material.unit, DEFAULT_UNIT);
        assert_eq!(material.stock, 0);
    }
}
