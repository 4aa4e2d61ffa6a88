//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod observable;
pub use observable::use_observable;

mod auth;
pub use auth::{use_api, use_auth, use_session, AuthProvider, LogoutButton, RouterNavigator, Session};
pub use store::AuthState;

mod collection;
pub use collection::{bind, use_collection, BrowserConfirm, CollectionActions, DraftEdit};

mod navbar;
pub use navbar::Navbar;

mod online_indicator;
pub use online_indicator::OnlineIndicator;

mod toast;
pub use toast::Toast;
