//! # Form state and validation
//!
//! Form fields are kept as the text the user typed; converting a draft into a
//! wire payload ([`Draft::payload`]) is where required fields are checked,
//! numbers and dates parsed, and empty optional text turned into `null`.
//! Whether a form creates or edits is explicit in [`FormMode`].

use api::{Material, MaterialPayload, Project, ProjectPayload, ProjectStatus};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Whether the open form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing(i64),
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Editing(_))
    }

    /// Heading prefix: "Novo" or "Editar".
    pub fn verb(&self) -> &'static str {
        match self {
            FormMode::Creating => "Novo",
            FormMode::Editing(_) => "Editar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("O campo \"{0}\" é obrigatório")]
    Required(&'static str),
    #[error("Informe um email válido")]
    InvalidEmail,
    #[error("Valor inválido em \"{field}\": {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("O campo \"{0}\" não pode ser negativo")]
    Negative(&'static str),
    #[error("Data inválida em \"{field}\": {value}")]
    InvalidDate { field: &'static str, value: String },
}

/// Editable copy of a record, convertible into the body the backend expects.
pub trait Draft: std::fmt::Debug + Clone + PartialEq + Default + 'static {
    type Payload: Serialize;

    fn payload(&self) -> Result<Self::Payload, ValidationError>;
}

/// Project form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub kind: String,
    pub status: ProjectStatus,
    pub start_date: String,
    pub target_date: String,
    pub estimated_value: String,
    pub notes: String,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            kind: "obra".to_string(),
            status: ProjectStatus::Ativo,
            start_date: String::new(),
            target_date: String::new(),
            estimated_value: String::new(),
            notes: String::new(),
        }
    }
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_default(),
            kind: project.kind.clone(),
            status: project.status,
            start_date: date_text(project.start_date),
            target_date: date_text(project.target_date),
            estimated_value: number_text(project.estimated_value),
            notes: project.notes.clone().unwrap_or_default(),
        }
    }
}

impl Draft for ProjectDraft {
    type Payload = ProjectPayload;

    fn payload(&self) -> Result<ProjectPayload, ValidationError> {
        let estimated_value = parse_decimal("Valor estimado", &self.estimated_value)?;
        if estimated_value.is_some_and(|v| v < 0.0) {
            return Err(ValidationError::Negative("Valor estimado"));
        }
        // Editing a project whose status this client does not know keeps it
        // as active rather than sending an invented value.
        let status = match self.status {
            ProjectStatus::Unknown => ProjectStatus::Ativo,
            known => known,
        };
        Ok(ProjectPayload {
            name: required("Nome", &self.name)?,
            description: optional(&self.description),
            kind: required("Tipo", &self.kind)?,
            status,
            start_date: parse_date("Data de início", &self.start_date)?,
            target_date: parse_date("Data prevista", &self.target_date)?,
            estimated_value,
            notes: optional(&self.notes),
        })
    }
}

/// Material form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDraft {
    pub name: String,
    pub kind: String,
    pub specification: String,
    pub unit_price: String,
    pub stock: String,
    pub unit: String,
    pub supplier: String,
}

impl Default for MaterialDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: String::new(),
            specification: String::new(),
            unit_price: String::new(),
            stock: "0".to_string(),
            unit: api::models::DEFAULT_UNIT.to_string(),
            supplier: String::new(),
        }
    }
}

impl From<&Material> for MaterialDraft {
    fn from(material: &Material) -> Self {
        Self {
            name: material.name.clone(),
            kind: material.kind.clone(),
            specification: material.specification.clone().unwrap_or_default(),
            unit_price: number_text(material.unit_price),
            stock: material.stock.to_string(),
            unit: material.unit.clone(),
            supplier: material.supplier.clone().unwrap_or_default(),
        }
    }
}

impl Draft for MaterialDraft {
    type Payload = MaterialPayload;

    fn payload(&self) -> Result<MaterialPayload, ValidationError> {
        let unit_price = parse_decimal("Preço unitário", &self.unit_price)?;
        if unit_price.is_some_and(|v| v < 0.0) {
            return Err(ValidationError::Negative("Preço unitário"));
        }
        let stock = parse_count("Estoque", &self.stock)?;
        let unit = optional(&self.unit).unwrap_or_else(|| api::models::DEFAULT_UNIT.to_string());
        Ok(MaterialPayload {
            name: required("Nome", &self.name)?,
            kind: required("Tipo", &self.kind)?,
            specification: optional(&self.specification),
            unit_price,
            stock,
            unit,
            supplier: optional(&self.supplier),
        })
    }
}

/// Login form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("Senha"));
        }
        Ok(())
    }
}

/// Registration form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("Nome", &self.name)?;
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::Required("Senha"));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = required("Email", email)?;
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::Required(field))
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse a decimal typed with either `.` or `,` as separator. Empty is `None`.
pub fn parse_decimal(field: &'static str, input: &str) -> Result<Option<f64>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let invalid = || ValidationError::InvalidNumber {
        field,
        value: input.to_string(),
    };
    // "1.234,56" (pt-BR) and "1234.56" are both accepted. A comma is only a
    // decimal separator when it is the single one and follows every dot.
    let normalized = match (input.rfind(','), input.rfind('.')) {
        (Some(comma), dot) => {
            if input.matches(',').count() > 1 || dot.is_some_and(|dot| dot > comma) {
                return Err(invalid());
            }
            input.replace('.', "").replace(',', ".")
        }
        (None, _) => input.to_string(),
    };
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(invalid)
}

/// Parse a whole, non-negative quantity. Empty is zero.
pub fn parse_count(field: &'static str, input: &str) -> Result<i64, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0);
    }
    let value: i64 = input.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: input.to_string(),
    })?;
    if value < 0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(value)
}

/// Parse a `YYYY-MM-DD` date as produced by `<input type="date">`.
pub fn parse_date(field: &'static str, input: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: input.to_string(),
        })
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_example_payload() {
        let draft = MaterialDraft {
            name: "Cabo 10mm".into(),
            kind: "elétrico".into(),
            stock: "5".into(),
            unit: "m".into(),
            ..MaterialDraft::default()
        };
        let body = serde_json::to_value(draft.payload().unwrap()).unwrap();
        assert_eq!(body["nome"], "Cabo 10mm");
        assert_eq!(body["tipo_material"], "elétrico");
        assert_eq!(body["estoque_atual"], 5);
        assert_eq!(body["unidade_medida"], "m");
        assert!(body["especificacoes"].is_null());
        assert!(body["preco_unitario"].is_null());
        assert!(body["fornecedor"].is_null());
    }

    #[test]
    fn test_blank_unit_defaults_to_un() {
        let draft = MaterialDraft {
            name: "Areia".into(),
            kind: "agregado".into(),
            unit: "  ".into(),
            ..MaterialDraft::default()
        };
        assert_eq!(draft.payload().unwrap().unit, "un");
    }

    #[test]
    fn test_required_fields() {
        let draft = ProjectDraft::default();
        assert_eq!(draft.payload(), Err(ValidationError::Required("Nome")));

        let draft = MaterialDraft {
            name: "Tijolo".into(),
            ..MaterialDraft::default()
        };
        assert_eq!(draft.payload(), Err(ValidationError::Required("Tipo")));
    }

    #[test]
    fn test_project_payload_parses_fields() {
        let draft = ProjectDraft {
            name: " Reforma ".into(),
            estimated_value: "1.234,50".into(),
            start_date: "2024-05-02".into(),
            status: ProjectStatus::Pausado,
            ..ProjectDraft::default()
        };
        let payload = draft.payload().unwrap();
        assert_eq!(payload.name, "Reforma");
        assert_eq!(payload.kind, "obra");
        assert_eq!(payload.estimated_value, Some(1234.5));
        assert_eq!(payload.start_date, NaiveDate::from_ymd_opt(2024, 5, 2));
        assert_eq!(payload.target_date, None);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn test_bad_numbers_and_dates_are_reported() {
        let draft = ProjectDraft {
            name: "X".into(),
            estimated_value: "muito".into(),
            ..ProjectDraft::default()
        };
        assert!(matches!(
            draft.payload(),
            Err(ValidationError::InvalidNumber { field: "Valor estimado", .. })
        ));

        let draft = ProjectDraft {
            name: "X".into(),
            target_date: "31/02/2024".into(),
            ..ProjectDraft::default()
        };
        assert!(matches!(draft.payload(), Err(ValidationError::InvalidDate { .. })));

        assert_eq!(parse_count("Estoque", "-3"), Err(ValidationError::Negative("Estoque")));
        assert_eq!(parse_decimal("Preço", "12.5"), Ok(Some(12.5)));
        assert_eq!(parse_decimal("Preço", "1.234,56"), Ok(Some(1234.56)));
        for mixed in ["1,234.56", "1,2,3"] {
            assert_eq!(
                parse_decimal("Valor", mixed),
                Err(ValidationError::InvalidNumber {
                    field: "Valor",
                    value: mixed.to_string(),
                })
            );
        }
    }

    #[test]
    fn test_edit_draft_prefills_from_record() {
        let material = Material {
            id: 9,
            name: "Cimento".into(),
            kind: "aglomerante".into(),
            specification: None,
            unit_price: Some(32.9),
            stock: 40,
            unit: "sc".into(),
            supplier: Some("Votoran".into()),
        };
        let draft = MaterialDraft::from(&material);
        assert_eq!(draft.unit_price, "32.9");
        assert_eq!(draft.stock, "40");
        assert_eq!(draft.specification, "");

        let payload = draft.payload().unwrap();
        assert_eq!(payload.unit_price, Some(32.9));
        assert_eq!(payload.supplier.as_deref(), Some("Votoran"));
    }

    #[test]
    fn test_auth_forms() {
        let login = LoginForm {
            email: "ana".into(),
            password: "x".into(),
        };
        assert_eq!(login.validate(), Err(ValidationError::InvalidEmail));

        let register = RegisterForm {
            name: "".into(),
            email: "ana@allupro.com".into(),
            password: "x".into(),
        };
        assert_eq!(register.validate(), Err(ValidationError::Required("Nome")));

        let ok = LoginForm {
            email: "ana@allupro.com".into(),
            password: "x".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_form_mode() {
        assert_eq!(FormMode::Creating.verb(), "Novo");
        assert!(FormMode::Editing(3).is_editing());
    }
}
