use std::rc::Rc;

use dioxus::prelude::*;
use store::{format_optional_currency, Page};

use crate::{use_api, use_auth, use_observable};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Counters and the most recent projects.
#[component]
pub fn DashboardView() -> Element {
    let client = use_api();
    let view = use_hook(|| Rc::new(store::DashboardView::new(client)));
    let state = use_observable(view.observable());
    let auth = use_auth();

    let _loader = use_resource(move || {
        let view = view.clone();
        async move {
            let _ = view.load().await;
        }
    });

    let s = state();
    let user_name = auth()
        .user
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();
    let data = s.data.unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "page",
            h1 { "Dashboard" }
            p { class: "muted", "Bem-vindo, {user_name}!" }

            if let Some(err) = s.error {
                div { class: "form-error", "{err}" }
            }

            if s.loading {
                p { class: "muted", "Carregando..." }
            } else {
                div {
                    class: "stat-grid",
                    div {
                        class: "stat-card",
                        h5 { "Total de Projetos" }
                        p { class: "stat-card__value", "{data.total_projects}" }
                    }
                    div {
                        class: "stat-card",
                        h5 { "Projetos Ativos" }
                        p { class: "stat-card__value", "{data.active_projects}" }
                    }
                    div {
                        class: "stat-card",
                        h5 { "Materiais Cadastrados" }
                        p { class: "stat-card__value", "{data.total_materials}" }
                    }
                }

                div {
                    class: "card",
                    div {
                        class: "card__header",
                        span { "Projetos Recentes" }
                        Link { class: "btn btn--primary btn--small", to: Page::Projects.path(), "Ver todos" }
                    }
                    if data.recent_projects.is_empty() {
                        p { class: "muted", "Nenhum projeto cadastrado ainda." }
                    } else {
                        table {
                            class: "table",
                            thead {
                                tr {
                                    th { "Nome" }
                                    th { "Cliente" }
                                    th { "Status" }
                                    th { "Valor" }
                                }
                            }
                            tbody {
                                for project in data.recent_projects {
                                    tr {
                                        key: "{project.id}",
                                        td { "{project.name}" }
                                        td { {project.client_name.unwrap_or_else(|| "-".to_string())} }
                                        td {
                                            span {
                                                class: "badge badge--{project.status.as_str()}",
                                                "{project.status.label()}"
                                            }
                                        }
                                        td { {format_optional_currency(project.estimated_value)} }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
