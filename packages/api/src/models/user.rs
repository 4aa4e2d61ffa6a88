//! # User model for authenticated users
//!
//! [`User`] is the record the backend hands back from `/login`, `/register`
//! and `/auth/check`. It is the only identity the client ever holds, and it
//! is held in the session store, never persisted locally.
//!
//! - `id` — backend primary key.
//! - `name` / `email` — profile fields entered at registration.
//! - `role` — role tag (`"cliente"` for self-registered accounts).
//!
//! [`User::display_name`] returns the name, falling back to the email when the
//! backend sent an empty name.

use serde::{Deserialize, Serialize};

/// Role assigned by the backend to accounts created through `/register`.
pub const DEFAULT_ROLE: &str = "cliente";

/// User information returned by the authentication endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "tipo_usuario", default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl User {
    /// Get display name, falling back to email if name is empty.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

/// Credentials sent to `/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// Account data sent to `/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

/// Response shape shared by `/login` and `/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of `/auth/check`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionCheck {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}
