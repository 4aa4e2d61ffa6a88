//! Backend reachability indicator for the navbar.

use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::{FaCloud, FaCloudArrowUp};
use crate::Icon;

/// A small icon reflecting whether the last session check reached the
/// backend. Hidden until that check has answered.
#[component]
pub fn OnlineIndicator() -> Element {
    let auth = use_auth();
    let state = auth();

    if state.loading {
        return rsx! {};
    }

    if state.online {
        rsx! {
            span {
                class: "online-indicator online-indicator--online",
                title: "Conectado",
                Icon { icon: FaCloud, width: 14, height: 14 }
            }
        }
    } else {
        rsx! {
            span {
                class: "online-indicator online-indicator--offline",
                title: "Servidor indisponível",
                Icon { icon: FaCloudArrowUp, width: 14, height: 14 }
            }
        }
    }
}
