//! # Pages and the route guard
//!
//! [`Page`] names every view of the application together with its path and
//! whether it needs a logged-in user. [`guard`] is the check run on every
//! navigation attempt; it only reads the session store and is synchronous.
//! Redirects are applied through [`Navigate`], which the `ui` crate
//! implements on top of the Dioxus router.

use crate::session::SessionStore;

/// A view of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Register,
    Dashboard,
    Projects,
    Materials,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Login,
        Page::Register,
        Page::Dashboard,
        Page::Projects,
        Page::Materials,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Login => "/login",
            Page::Register => "/register",
            Page::Dashboard => "/dashboard",
            Page::Projects => "/projetos",
            Page::Materials => "/materiais",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Início",
            Page::Login => "Entrar",
            Page::Register => "Cadastrar",
            Page::Dashboard => "Dashboard",
            Page::Projects => "Projetos",
            Page::Materials => "Materiais",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Page::Dashboard | Page::Projects | Page::Materials)
    }

    /// Resolve a location path. Unknown paths fall back to [`Page::Home`].
    pub fn from_path(path: &str) -> Page {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        match path {
            "" | "/home" => Page::Home,
            "/login" => Page::Login,
            "/register" => Page::Register,
            "/dashboard" => Page::Dashboard,
            "/projetos" => Page::Projects,
            "/materiais" => Page::Materials,
            _ => Page::Home,
        }
    }
}

/// Something that can move the application to another page.
pub trait Navigate {
    /// User-driven navigation; adds a history entry.
    fn navigate(&self, page: Page);

    /// Forced navigation that replaces the current entry, so "back" does not
    /// return to the page that was refused.
    fn redirect(&self, page: Page) {
        self.navigate(page);
    }
}

impl<F: Fn(Page)> Navigate for F {
    fn navigate(&self, page: Page) {
        self(page)
    }
}

/// Outcome of a guarded navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Deny the attempt and go here instead.
    Redirect(Page),
}

/// Decide whether `page` may be entered with the current session.
pub fn guard<T>(session: &SessionStore<T>, page: Page) -> GuardDecision {
    if page.requires_auth() && !session.is_authenticated() {
        tracing::debug!("Blocked {} without a session", page.path());
        GuardDecision::Redirect(Page::Login)
    } else {
        GuardDecision::Allow
    }
}

/// Where a logged-in user landing on a public entry page is sent instead.
pub fn entry_redirect<T>(session: &SessionStore<T>, page: Page) -> Option<Page> {
    let entry = matches!(page, Page::Home | Page::Login | Page::Register);
    (entry && session.is_authenticated()).then_some(Page::Dashboard)
}

/// Run the guard and apply its decision. Returns whether the original
/// navigation went ahead.
pub fn navigate<T>(session: &SessionStore<T>, page: Page, navigator: &impl Navigate) -> bool {
    match guard(session, page) {
        GuardDecision::Allow => {
            navigator.navigate(page);
            true
        }
        GuardDecision::Redirect(target) => {
            navigator.redirect(target);
            false
        }
    }
}
