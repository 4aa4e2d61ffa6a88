//! # Wire models for the Portal ALLUPRO REST backend
//!
//! Rust names are English; the JSON field names are the backend's Portuguese
//! column names, mapped with `#[serde(rename)]`.
//!
//! | Module | Types |
//! |--------|-------|
//! | [`user`] | [`User`], login/register requests, [`AuthResponse`], [`SessionCheck`] |
//! | [`project`] | [`Project`], [`ProjectStatus`], [`ProjectPayload`] |
//! | [`material`] | [`Material`], [`MaterialPayload`] |
//! | [`dashboard`] | [`Dashboard`], [`RecentProject`] |
//!
//! [`MutationResponse`] is the `{success, id?, error?}` envelope every
//! create/update/delete endpoint answers with.

use serde::{Deserialize, Serialize};

pub mod dashboard;
pub mod material;
pub mod project;
pub mod user;

pub use dashboard::{Dashboard, RecentProject};
pub use material::{Material, MaterialPayload, DEFAULT_UNIT};
pub use project::{Project, ProjectPayload, ProjectStatus};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, SessionCheck, User};

/// Envelope returned by mutation endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MutationResponse {
    pub success: bool,
    /// Id of the created row (create endpoints only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn created(id: i64) -> Self {
        Self {
            success: true,
            id: Some(id),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(error.into()),
        }
    }
}

/// Serde helpers for optional `YYYY-MM-DD` dates.
///
/// The backend stores dates as SQLite text, so a cleared date can come back
/// as `""` and a timestamp column as `"YYYY-MM-DD HH:MM:SS"`.
pub(crate) mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
