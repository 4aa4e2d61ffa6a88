//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the application's [`SessionStore`], hands it to the
//! tree through context, and runs the startup session check. Components read
//! the state through [`use_auth`] and act on it through [`use_session`].

use std::ops::Deref;
use std::rc::Rc;

use api::{ApiConfig, HttpClient};
use dioxus::prelude::*;
use store::{AuthState, Navigate, Page, SessionStore};

use crate::use_observable;

/// Shared handle to the application's session store.
#[derive(Clone)]
pub struct Session(Rc<SessionStore<HttpClient>>);

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Session {
    type Target = SessionStore<HttpClient>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Router-backed [`Navigate`]. Navigation pushes a history entry, redirects
/// replace the current one.
#[derive(Clone, Copy)]
pub struct RouterNavigator(pub Navigator);

impl Navigate for RouterNavigator {
    fn navigate(&self, page: Page) {
        tracing::debug!("Navigating to {}", page.path());
        let _ = self.0.push(page.path());
    }

    fn redirect(&self, page: Page) {
        tracing::debug!("Redirecting to {}", page.path());
        let _ = self.0.replace(page.path());
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_session() -> Session {
    use_context::<Session>()
}

/// The HTTP client the session store talks through. Clones share cookies.
pub fn use_api() -> HttpClient {
    use_session().transport().clone()
}

#[cfg(target_arch = "wasm32")]
const CONNECTIVITY_INTERVAL: std::time::Duration = std::time::Duration::from_secs(30);

fn connect() -> Result<HttpClient, String> {
    let config = ApiConfig::load().unwrap_or_else(|e| {
        tracing::error!("Invalid configuration, using defaults: {}", e);
        ApiConfig::default()
    });
    tracing::info!("Backend at {}", config.base_url);
    HttpClient::new(config).map_err(|e| e.to_string())
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let session = use_hook(|| {
        connect().map(|client| Session(Rc::new(SessionStore::new(client))))
    });

    match session {
        Ok(session) => rsx! {
            SessionScope { session, {children} }
        },
        Err(message) => rsx! {
            div {
                class: "fatal-error",
                "{message}"
            }
        },
    }
}

#[component]
fn SessionScope(session: Session, children: Element) -> Element {
    let auth_state = use_observable(session.observable());
    use_context_provider(|| session.clone());
    use_context_provider(|| auth_state);

    // Check the session cookie on mount
    let _ = use_resource({
        let session = session.clone();
        move || {
            let session = session.clone();
            async move {
                if let Some(user) = session.check_session().await {
                    tracing::info!("Resumed session for {}", user.email);
                }
            }
        }
    });

    // Periodic connectivity check
    #[cfg(target_arch = "wasm32")]
    let _connectivity = use_hook(move || {
        spawn(async move {
            loop {
                gloo_timers::future::sleep(CONNECTIVITY_INTERVAL).await;
                session.refresh().await;
            }
        })
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sair".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();
    let navigator = RouterNavigator(use_navigator());

    let onclick = move |_| {
        let session = session.clone();
        async move {
            session.logout(&navigator).await;
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
