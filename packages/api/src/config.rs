//! # Client configuration
//!
//! The only setting the frontend needs is the backend base URL.
//!
//! On native targets it is layered with the `config` crate:
//!
//! 1. default `http://localhost:5000/api`
//! 2. optional `portal.toml` in the working directory (`base_url = "..."`)
//! 3. environment variables with the `PORTAL_` prefix (`PORTAL_BASE_URL`),
//!    after `.env` has been loaded with `dotenvy`
//!
//! In the browser there is no environment, so `PORTAL_BASE_URL` is read at
//! compile time instead.

use serde::Deserialize;

use crate::error::ConfigError;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Build a config for an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self {
            base_url: base_url.into(),
        }
        .normalized()
    }

    /// Load the layered configuration.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        use config::{Config, Environment, File, FileFormat};

        dotenvy::dotenv().ok();

        let config: Self = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .add_source(
                File::with_name("portal.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("PORTAL"))
            .build()?
            .try_deserialize()?;
        config.normalized()
    }

    /// Load the compile-time configuration.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        Self::new(option_env!("PORTAL_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    /// Join a backend path (`/projetos/3`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url.clone();
        }
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    fn normalized(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let valid = trimmed.starts_with("http://")
            || trimmed.starts_with("https://")
            || (trimmed.starts_with('/') || trimmed.is_empty());
        if !valid {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        self.base_url = trimmed;
        Ok(self)
    }
}
