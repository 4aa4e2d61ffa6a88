//! Layout for the pages that need a logged-in user.

use dioxus::prelude::*;
use store::{guard, GuardDecision, Navigate};
use ui::{use_auth, use_session, Navbar, RouterNavigator};

use crate::Route;

/// Waits for the startup session check, then applies the route guard.
#[component]
pub fn Protected() -> Element {
    let auth = use_auth();
    let session = use_session();
    let navigator = RouterNavigator(use_navigator());
    let route = use_route::<Route>();

    if auth().loading {
        return rsx! {
            div { class: "loading-screen", "Carregando..." }
        };
    }

    if let GuardDecision::Redirect(target) = guard(&*session, route.page()) {
        navigator.redirect(target);
        return rsx! {};
    }

    rsx! {
        Navbar {}
        main {
            Outlet::<Route> {}
        }
    }
}
