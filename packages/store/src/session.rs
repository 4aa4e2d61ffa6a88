//! # Session store
//!
//! [`SessionStore`] is the single source of truth for "who is logged in". It
//! holds at most one [`User`] in an [`Observable<AuthState>`], and is owned by
//! the application root and handed to consumers explicitly (Dioxus context in
//! the `ui` crate), never reached through a global.
//!
//! The state is advisory: it mirrors the last answer the backend gave and may
//! be stale until the next [`check_session`](SessionStore::check_session). The
//! backend's session cookie is what actually grants access.

use api::{ApiError, AuthResponse, LoginRequest, RegisterRequest, SessionCheck, Transport, User};
use serde::Serialize;
use thiserror::Error;

use crate::observable::{Observable, Subscription};
use crate::routes::{Navigate, Page};

/// Shown when the backend cannot be reached during login or registration.
pub const CONNECTION_ERROR: &str = "Erro de conexão. Verifique se o backend está rodando.";
const LOGIN_FALLBACK: &str = "Erro ao fazer login";
const REGISTER_FALLBACK: &str = "Erro ao cadastrar";

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the startup session check has answered.
    pub loading: bool,
    /// Whether the last session check reached the backend.
    pub online: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            online: false,
        }
    }
}

/// Why a login or registration did not produce a user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The backend answered and refused; carries its message.
    #[error("{0}")]
    Rejected(String),
    #[error("Erro de conexão. Verifique se o backend está rodando.")]
    Connection(#[source] ApiError),
}

pub struct SessionStore<T> {
    transport: T,
    state: Observable<AuthState>,
}

impl<T> SessionStore<T> {
    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn observable(&self) -> &Observable<AuthState> {
        &self.state
    }

    pub fn subscribe(&self, callback: impl Fn(&AuthState) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.user.is_some())
    }

    /// False while the startup check is still in flight.
    pub fn is_ready(&self) -> bool {
        self.state.with(|s| !s.loading)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> SessionStore<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Observable::new(AuthState::default()),
        }
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.authenticate("/login", &request, LOGIN_FALLBACK).await
    }

    /// Create an account; the backend logs the new user in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.authenticate("/register", &request, REGISTER_FALLBACK).await
    }

    /// Forget the user locally, go to the login page, and ask the backend to
    /// drop the session. The backend's answer is not waited on for the local
    /// effects and is otherwise ignored.
    pub async fn logout(&self, navigator: &impl Navigate) {
        if let Some(user) = self.current_user() {
            tracing::info!("Logging out {}", user.email);
        }
        self.state.update(|s| {
            s.user = None;
            s.loading = false;
        });
        navigator.redirect(Page::Login);

        let result: Result<serde_json::Value, ApiError> = self
            .transport
            .create("/logout", &serde_json::Map::new())
            .await;
        if let Err(e) = result {
            tracing::debug!("Logout request failed (ignored): {}", e);
        }
    }

    /// Ask the backend whether the session cookie is still valid.
    ///
    /// Never fails: an unreachable backend counts as "not authenticated".
    pub async fn check_session(&self) -> Option<User> {
        let result: Result<SessionCheck, ApiError> = self.transport.fetch("/auth/check").await;
        let (user, online) = match result {
            Ok(SessionCheck {
                authenticated: true,
                user: Some(user),
            }) => (Some(user), true),
            Ok(_) => (None, true),
            Err(e) => {
                tracing::warn!("Session check failed: {}", e);
                (None, false)
            }
        };

        match &user {
            Some(u) => tracing::info!("Session restored for {}", u.email),
            None => tracing::debug!("No active session"),
        }
        self.state.set(AuthState {
            user: user.clone(),
            loading: false,
            online,
        });
        user
    }

    /// Periodic connectivity re-check. Unlike [`check_session`], an
    /// unreachable backend only clears `online` and keeps the user; an
    /// answering backend is authoritative for both. Skipped while the startup
    /// check is still pending. Observers are only notified on a change.
    ///
    /// [`check_session`]: SessionStore::check_session
    pub async fn refresh(&self) {
        if self.state.with(|s| s.loading) {
            return;
        }
        let result: Result<SessionCheck, ApiError> = self.transport.fetch("/auth/check").await;
        let current = self.state.get();
        let next = match result {
            Ok(check) => AuthState {
                user: check.user.filter(|_| check.authenticated),
                loading: false,
                online: true,
            },
            Err(e) => {
                tracing::debug!("Connectivity check failed: {}", e);
                AuthState {
                    online: false,
                    ..current.clone()
                }
            }
        };
        if next != current {
            if current.user.is_some() && next.user.is_none() {
                tracing::info!("Session ended on the backend");
            }
            self.state.set(next);
        }
    }

    async fn authenticate<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<User, AuthError> {
        let result: Result<AuthResponse, ApiError> = self.transport.create(path, body).await;
        match result {
            Ok(AuthResponse {
                success: true,
                user: Some(user),
                ..
            }) => {
                tracing::info!("Authenticated as {}", user.email);
                self.state.set(AuthState {
                    user: Some(user.clone()),
                    loading: false,
                    online: true,
                });
                Ok(user)
            }
            Ok(response) => {
                let message = response
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string());
                tracing::debug!("{} rejected: {}", path, message);
                Err(AuthError::Rejected(message))
            }
            Err(e) => match e.server_message() {
                Some(message) => Err(AuthError::Rejected(message.to_string())),
                None => {
                    tracing::error!("{} failed: {}", path, e);
                    Err(AuthError::Connection(e))
                }
            },
        }
    }
}
