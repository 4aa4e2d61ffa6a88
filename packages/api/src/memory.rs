//! In-memory implementation of the backend REST surface.
//!
//! [`MemoryBackend`] answers every endpoint the frontend uses (auth, dashboard,
//! projects, materials) from in-process tables, with the same response shapes
//! and session semantics as the real backend. Clones share state, so a test can
//! hand one clone to the session store and another to a view.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::Transport;
use crate::error::{ApiError, Operation};
use crate::models::dashboard::RECENT_LIMIT;
use crate::models::{
    AuthResponse, Dashboard, Material, MaterialPayload, MutationResponse, Project,
    ProjectPayload, RecentProject, SessionCheck, User, DEFAULT_UNIT,
};
use crate::models::user::DEFAULT_ROLE;

/// A request the backend has seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub op: Operation,
    pub path: String,
}

/// A canned answer for the next request matching `(op, path)`.
#[derive(Debug, Clone)]
enum Fault {
    Status(u16, Option<String>),
    Rejected(String),
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    /// Insertion order is creation order.
    projects: Vec<Project>,
    materials: Vec<Material>,
    session: Option<i64>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    faults: HashMap<(Operation, String), Fault>,
    offline: bool,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn session_user(&self) -> Option<&User> {
        let id = self.session?;
        self.accounts
            .iter()
            .map(|a| &a.user)
            .find(|u| u.id == id)
    }
}

/// In-memory backend for tests and offline demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an account directly, without logging in.
    pub fn add_user(&self, name: &str, email: &str, password: &str) -> User {
        let mut tables = self.tables();
        let user = User {
            id: tables.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            role: DEFAULT_ROLE.to_string(),
        };
        tables.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    /// Insert a project as if another client had created it.
    pub fn seed_project(&self, payload: ProjectPayload) -> i64 {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.projects.push(project_from(id, payload, None));
        id
    }

    /// Insert a material as if another client had created it.
    pub fn seed_material(&self, payload: MaterialPayload) -> i64 {
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.materials.push(material_from(id, payload));
        id
    }

    /// Mark the cookie session as logged in for `user`.
    pub fn sign_in(&self, user: &User) {
        self.tables().session = Some(user.id);
    }

    /// Drop the server-side session, as an expiry would.
    pub fn expire_session(&self) {
        self.tables().session = None;
    }

    /// While offline every request fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.tables().offline = offline;
    }

    /// Answer the next `(op, path)` request with an HTTP error status.
    pub fn fail_next(&self, op: Operation, path: &str, status: u16, message: Option<&str>) {
        self.tables().faults.insert(
            (op, path.to_string()),
            Fault::Status(status, message.map(str::to_owned)),
        );
    }

    /// Answer the next `(op, path)` mutation with `{success: false, error}`
    /// and a 200 status, leaving the data untouched.
    pub fn reject_next(&self, op: Operation, path: &str, error: &str) {
        self.tables()
            .faults
            .insert((op, path.to_string()), Fault::Rejected(error.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.tables().requests.clone()
    }

    /// How many times `(op, path)` was requested.
    pub fn count(&self, op: Operation, path: &str) -> usize {
        self.tables()
            .requests
            .iter()
            .filter(|r| r.op == op && r.path == path)
            .count()
    }

    pub fn projects(&self) -> Vec<Project> {
        self.tables().projects.clone()
    }

    pub fn materials(&self) -> Vec<Material> {
        self.tables().materials.clone()
    }

    pub fn session_user(&self) -> Option<User> {
        self.tables().session_user().cloned()
    }

    fn dispatch(&self, op: Operation, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let mut tables = self.tables();
        tables.requests.push(RecordedRequest {
            op,
            path: path.to_string(),
        });

        if tables.offline {
            return Err(ApiError::Network {
                op,
                reason: "backend offline".to_string(),
            });
        }
        if let Some(fault) = tables.faults.remove(&(op, path.to_string())) {
            return match fault {
                Fault::Status(status, message) => Err(ApiError::Status {
                    op,
                    status,
                    message,
                }),
                Fault::Rejected(error) => to_value(op, MutationResponse::failed(error)),
            };
        }

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match (op, segments.as_slice()) {
            (Operation::Create, ["login"]) => login(&mut tables, op, body),
            (Operation::Create, ["register"]) => register(&mut tables, op, body),
            (Operation::Create, ["logout"]) => {
                tables.session = None;
                to_value(op, MutationResponse::ok())
            }
            (Operation::Fetch, ["auth", "check"]) => {
                let user = tables.session_user().cloned();
                to_value(
                    op,
                    SessionCheck {
                        authenticated: user.is_some(),
                        user,
                    },
                )
            }
            (_, [resource, ..]) if is_protected(resource) && tables.session.is_none() => {
                Err(ApiError::Status {
                    op,
                    status: 401,
                    message: Some("Não autenticado".to_string()),
                })
            }
            (Operation::Fetch, ["dashboard"]) => to_value(op, dashboard(&tables)),
            (Operation::Fetch, ["projetos"]) => {
                let mut projects = tables.projects.clone();
                projects.reverse();
                to_value(op, projects)
            }
            (Operation::Create, ["projetos"]) => {
                let payload: ProjectPayload = parse_body(op, body)?;
                let id = tables.next_id();
                tables.projects.push(project_from(id, payload, None));
                to_value(op, MutationResponse::created(id))
            }
            (Operation::Replace, ["projetos", id]) => {
                let id = parse_id(op, id)?;
                let payload: ProjectPayload = parse_body(op, body)?;
                // The backend reports success whether or not a row matched.
                if let Some(slot) = tables.projects.iter_mut().find(|p| p.id == id) {
                    let client = slot.client_name.take();
                    *slot = project_from(id, payload, client);
                }
                to_value(op, MutationResponse::ok())
            }
            (Operation::Remove, ["projetos", id]) => {
                let id = parse_id(op, id)?;
                tables.projects.retain(|p| p.id != id);
                to_value(op, MutationResponse::ok())
            }
            (Operation::Fetch, ["materiais"]) => {
                let mut materials = tables.materials.clone();
                materials.sort_by(|a, b| a.name.cmp(&b.name));
                to_value(op, materials)
            }
            (Operation::Create, ["materiais"]) => {
                let payload: MaterialPayload = parse_body(op, body)?;
                let id = tables.next_id();
                tables.materials.push(material_from(id, payload));
                to_value(op, MutationResponse::created(id))
            }
            (Operation::Replace, ["materiais", id]) => {
                let id = parse_id(op, id)?;
                let payload: MaterialPayload = parse_body(op, body)?;
                if let Some(slot) = tables.materials.iter_mut().find(|m| m.id == id) {
                    *slot = material_from(id, payload);
                }
                to_value(op, MutationResponse::ok())
            }
            (Operation::Remove, ["materiais", id]) => {
                let id = parse_id(op, id)?;
                tables.materials.retain(|m| m.id != id);
                to_value(op, MutationResponse::ok())
            }
            _ => Err(ApiError::Status {
                op,
                status: 404,
                message: None,
            }),
        }
    }

    fn call<R: DeserializeOwned>(
        &self,
        op: Operation,
        path: &str,
        body: Option<Value>,
    ) -> Result<R, ApiError> {
        let value = self.dispatch(op, path, body)?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            op,
            reason: e.to_string(),
        })
    }
}

impl Transport for MemoryBackend {
    async fn fetch<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.call(Operation::Fetch, path, None)
    }

    async fn create<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = encode_body(Operation::Create, body)?;
        self.call(Operation::Create, path, Some(body))
    }

    async fn replace<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = encode_body(Operation::Replace, body)?;
        self.call(Operation::Replace, path, Some(body))
    }

    async fn remove<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.call(Operation::Remove, path, None)
    }
}

fn is_protected(resource: &str) -> bool {
    matches!(resource, "dashboard" | "projetos" | "materiais")
}

fn login(tables: &mut Tables, op: Operation, body: Option<Value>) -> Result<Value, ApiError> {
    let body = body.unwrap_or(Value::Null);
    let email = body["email"].as_str().unwrap_or_default().trim().to_lowercase();
    let password = body["senha"].as_str().unwrap_or_default();

    let found = tables
        .accounts
        .iter()
        .find(|a| a.user.email.to_lowercase() == email && a.password == password)
        .map(|a| a.user.clone());

    let response = match found {
        Some(user) => {
            tables.session = Some(user.id);
            AuthResponse {
                success: true,
                user: Some(user),
                error: None,
            }
        }
        None => AuthResponse {
            success: false,
            user: None,
            error: Some("Email ou senha incorretos!".to_string()),
        },
    };
    to_value(op, response)
}

fn register(tables: &mut Tables, op: Operation, body: Option<Value>) -> Result<Value, ApiError> {
    let body = body.unwrap_or(Value::Null);
    let name = body["nome"].as_str().unwrap_or_default().trim().to_string();
    let email = body["email"].as_str().unwrap_or_default().trim().to_lowercase();
    let password = body["senha"].as_str().unwrap_or_default().to_string();

    let failure = |error: &str| {
        to_value(
            op,
            AuthResponse {
                success: false,
                user: None,
                error: Some(error.to_string()),
            },
        )
    };

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return failure("Todos os campos são obrigatórios!");
    }
    if tables
        .accounts
        .iter()
        .any(|a| a.user.email.to_lowercase() == email)
    {
        return failure("Email já cadastrado!");
    }

    let user = User {
        id: tables.next_id(),
        name,
        email,
        role: DEFAULT_ROLE.to_string(),
    };
    tables.accounts.push(Account {
        user: user.clone(),
        password,
    });
    tables.session = Some(user.id);
    to_value(
        op,
        AuthResponse {
            success: true,
            user: Some(user),
            error: None,
        },
    )
}

fn dashboard(tables: &Tables) -> Dashboard {
    let recent_projects = tables
        .projects
        .iter()
        .rev()
        .take(RECENT_LIMIT)
        .map(|p| RecentProject {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            status: p.status,
            client_name: p.client_name.clone(),
            estimated_value: p.estimated_value,
        })
        .collect();

    Dashboard {
        total_projects: tables.projects.len() as u64,
        active_projects: tables.projects.iter().filter(|p| p.status.is_active()).count() as u64,
        total_materials: tables.materials.len() as u64,
        recent_projects,
    }
}

fn project_from(id: i64, payload: ProjectPayload, client_name: Option<String>) -> Project {
    Project {
        id,
        name: payload.name,
        description: payload.description,
        kind: payload.kind,
        status: payload.status,
        start_date: payload.start_date,
        target_date: payload.target_date,
        estimated_value: payload.estimated_value,
        client_name,
        notes: payload.notes,
    }
}

fn material_from(id: i64, payload: MaterialPayload) -> Material {
    let unit = if payload.unit.trim().is_empty() {
        DEFAULT_UNIT.to_string()
    } else {
        payload.unit
    };
    Material {
        id,
        name: payload.name,
        kind: payload.kind,
        specification: payload.specification,
        unit_price: payload.unit_price,
        stock: payload.stock,
        unit,
        supplier: payload.supplier,
    }
}

fn encode_body<B: Serialize + ?Sized>(op: Operation, body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode {
        op,
        reason: e.to_string(),
    })
}

fn to_value<T: Serialize>(op: Operation, value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode {
        op,
        reason: e.to_string(),
    })
}

/// Bad bodies get the backend's `400 {success: false, error}` treatment.
fn parse_body<T: DeserializeOwned>(op: Operation, body: Option<Value>) -> Result<T, ApiError> {
    serde_json::from_value(body.unwrap_or(Value::Null)).map_err(|e| ApiError::Status {
        op,
        status: 400,
        message: Some(e.to_string()),
    })
}

fn parse_id(op: Operation, raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::Status {
        op,
        status: 404,
        message: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use serde_json::json;

    fn backend_with_session() -> MemoryBackend {
        let backend = MemoryBackend::new();
        let user = backend.add_user("Ana", "ana@allupro.com", "senha123");
        backend.sign_in(&user);
        backend
    }

    fn payload(name: &str, status: ProjectStatus) -> ProjectPayload {
        ProjectPayload {
            name: name.to_string(),
            description: None,
            kind: "obra".to_string(),
            status,
            start_date: None,
            target_date: None,
            estimated_value: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_login_sets_cookie_session() {
        let backend = MemoryBackend::new();
        backend.add_user("Ana", "ana@allupro.com", "senha123");

        let denied: AuthResponse = backend
            .create("/login", &json!({"email": "ana@allupro.com", "senha": "errada"}))
            .await
            .unwrap();
        assert!(!denied.success);
        assert_eq!(denied.error.as_deref(), Some("Email ou senha incorretos!"));

        let check: SessionCheck = backend.fetch("/auth/check").await.unwrap();
        assert!(!check.authenticated);

        let ok: AuthResponse = backend
            .create("/login", &json!({"email": "ANA@allupro.com", "senha": "senha123"}))
            .await
            .unwrap();
        assert!(ok.success);

        let check: SessionCheck = backend.fetch("/auth/check").await.unwrap();
        assert!(check.authenticated);
        assert_eq!(check.user.unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let backend = MemoryBackend::new();
        backend.add_user("Ana", "ana@allupro.com", "senha123");

        let response: AuthResponse = backend
            .create(
                "/register",
                &json!({"nome": "Outra", "email": "ana@allupro.com", "senha": "x"}),
            )
            .await
            .unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Email já cadastrado!"));
        assert!(backend.session_user().is_none());
    }

    #[tokio::test]
    async fn test_protected_paths_need_a_session() {
        let backend = MemoryBackend::new();
        let err = backend
            .fetch::<Vec<Project>>("/projetos")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_project_crud_and_dashboard() {
        let backend = backend_with_session();

        let created: MutationResponse = backend
            .create("/projetos", &payload("Casa", ProjectStatus::Ativo))
            .await
            .unwrap();
        assert!(created.success);
        let id = created.id.unwrap();
        backend.seed_project(payload("Galpão", ProjectStatus::Pausado));

        let listed: Vec<Project> = backend.fetch("/projetos").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Galpão", "newest first");

        let updated: MutationResponse = backend
            .replace(&format!("/projetos/{id}"), &payload("Casa 2", ProjectStatus::Concluido))
            .await
            .unwrap();
        assert!(updated.success);

        let dashboard: Dashboard = backend.fetch("/dashboard").await.unwrap();
        assert_eq!(dashboard.total_projects, 2);
        assert_eq!(dashboard.active_projects, 0);
        assert_eq!(dashboard.recent_projects[1].name, "Casa 2");

        let _: MutationResponse = backend.remove(&format!("/projetos/{id}")).await.unwrap();
        assert_eq!(backend.projects().len(), 1);
    }

    #[tokio::test]
    async fn test_materials_listed_by_name() {
        let backend = backend_with_session();
        for name in ["Tijolo", "Areia", "Cimento"] {
            let _: MutationResponse = backend
                .create(
                    "/materiais",
                    &json!({"nome": name, "tipo_material": "obra", "unidade_medida": ""}),
                )
                .await
                .unwrap();
        }
        let listed: Vec<Material> = backend.fetch("/materiais").await.unwrap();
        let names: Vec<&str> = listed.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Areia", "Cimento", "Tijolo"]);
        assert!(listed.iter().all(|m| m.unit == DEFAULT_UNIT));
    }

    #[tokio::test]
    async fn test_faults_apply_once() {
        let backend = backend_with_session();
        backend.fail_next(Operation::Fetch, "/materiais", 500, None);

        assert!(backend.fetch::<Vec<Material>>("/materiais").await.is_err());
        assert!(backend.fetch::<Vec<Material>>("/materiais").await.is_ok());
        assert_eq!(backend.count(Operation::Fetch, "/materiais"), 2);

        backend.set_offline(true);
        let err = backend.fetch::<Dashboard>("/dashboard").await.unwrap_err();
        assert!(err.is_connectivity());
    }

    #[tokio::test]
    async fn test_invalid_body_is_a_400() {
        let backend = backend_with_session();
        let err = backend
            .create::<_, MutationResponse>("/projetos", &json!({"descricao": "sem nome"}))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.server_message().is_some());
    }
}
