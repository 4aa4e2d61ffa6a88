use dioxus::prelude::*;
use store::Page;

use crate::{use_auth, use_session, LogoutButton, OnlineIndicator, RouterNavigator};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar: brand, the authenticated pages, and the current user.
#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let session = use_session();
    let navigator = RouterNavigator(use_navigator());
    let go = use_callback(move |page: Page| {
        store::navigate(&*session, page, &navigator);
    });
    let state = auth();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            Link {
                class: "navbar__brand",
                to: Page::Home.path(),
                "ALLUPRO"
            }

            if let Some(user) = state.user {
                div {
                    class: "navbar__links",
                    for page in [Page::Dashboard, Page::Projects, Page::Materials] {
                        a {
                            key: "{page.path()}",
                            class: "navbar__link",
                            href: page.path(),
                            onclick: move |evt: MouseEvent| {
                                evt.prevent_default();
                                go.call(page);
                            },
                            "{page.title()}"
                        }
                    }
                }
                div {
                    class: "navbar__user",
                    OnlineIndicator {}
                    span { "{user.display_name()}" }
                    LogoutButton { class: "btn btn--outline" }
                }
            } else {
                div {
                    class: "navbar__links",
                    Link { class: "navbar__link", to: Page::Login.path(), "Entrar" }
                    Link { class: "btn btn--primary", to: Page::Register.path(), "Cadastrar" }
                }
            }
        }
    }
}
