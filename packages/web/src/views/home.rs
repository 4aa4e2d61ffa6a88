//! Public landing page.

use dioxus::prelude::*;
use store::{entry_redirect, Page};
use ui::{use_auth, use_session};

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let session = use_session();
    let nav = use_navigator();

    // Logged-in visitors go straight to the dashboard
    if !auth().loading {
        if let Some(target) = entry_redirect(&*session, Page::Home) {
            nav.replace(target.path());
        }
    }

    rsx! {
        header {
            class: "hero",
            h1 { "Gestão de Projetos e Materiais" }
            p { "Organize seus projetos, controle materiais e acompanhe tudo em um só lugar." }
            div {
                Link { class: "btn btn--primary", to: Page::Register.path(), "Começar agora" }
                Link { class: "btn btn--outline", to: Page::Login.path(), "Já tenho conta" }
            }
        }

        section {
            class: "features",
            div {
                class: "card",
                h3 { "Projetos" }
                p { class: "muted", "Crie e gerencie seus projetos com status, prazos e valores." }
            }
            div {
                class: "card",
                h3 { "Materiais" }
                p { class: "muted", "Cadastre materiais, controle estoque e acompanhe fornecedores." }
            }
            div {
                class: "card",
                h3 { "Dashboard" }
                p { class: "muted", "Visualize estatísticas e projetos recentes em tempo real." }
            }
        }
    }
}
