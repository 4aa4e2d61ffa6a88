//! # API crate — REST access for Portal ALLUPRO
//!
//! Everything the frontend knows about the backend lives here: the wire
//! models, the [`Transport`] seam the rest of the workspace calls through,
//! and its two implementations.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `User`, `Project`, `Material`, `Dashboard` and request/response envelopes, with the backend's Portuguese field names |
//! | [`client`] | [`Transport`] trait and the `reqwest`-based [`HttpClient`] |
//! | [`config`] | [`ApiConfig`] — backend base URL, layered from defaults, `portal.toml` and `PORTAL_*` env vars |
//! | [`error`] | [`ApiError`] (per-operation failure messages) and [`ConfigError`] |
//! | [`memory`] | [`MemoryBackend`] — the whole REST surface served from memory, for tests and demos |
//!
//! ## Endpoints
//!
//! | Method | Path | Used by |
//! |--------|------|---------|
//! | `POST` | `/login`, `/register`, `/logout` | session store |
//! | `GET` | `/auth/check` | session store (startup) |
//! | `GET` | `/dashboard` | dashboard view |
//! | `GET` `POST` | `/projetos` | projects view |
//! | `PUT` `DELETE` | `/projetos/{id}` | projects view |
//! | `GET` `POST` | `/materiais` | materials view |
//! | `PUT` `DELETE` | `/materiais/{id}` | materials view |

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod models;

pub use client::{HttpClient, Transport};
pub use config::ApiConfig;
pub use error::{ApiError, ConfigError, Operation};
pub use memory::{MemoryBackend, RecordedRequest};
pub use models::{
    AuthResponse, Dashboard, LoginRequest, Material, MaterialPayload, MutationResponse, Project,
    ProjectPayload, ProjectStatus, RecentProject, RegisterRequest, SessionCheck, User,
};
