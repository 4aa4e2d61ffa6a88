use api::{Project, ProjectStatus};
use dioxus::prelude::*;
use store::{format_date, format_optional_currency, FormState, ProjectDraft};

use super::ModalOverlay;
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::{bind, use_collection, DraftEdit, Icon, Toast};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Project list with its create/edit form.
#[component]
pub fn ProjectsView() -> Element {
    let (state, actions) = use_collection::<Project>();
    let s = state();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        Toast { notice: s.notice, on_dismiss: actions.dismiss }

        div {
            class: "page",
            div {
                class: "page__header",
                h1 { "Projetos" }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| actions.open_new.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Novo Projeto"
                }
            }

            if let Some(err) = s.error {
                div { class: "form-error", "{err}" }
            }

            if s.loading && s.items.is_empty() {
                p { class: "muted", "Carregando..." }
            } else if s.items.is_empty() {
                p { class: "muted", "Nenhum projeto cadastrado." }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Nome" }
                            th { "Tipo" }
                            th { "Status" }
                            th { "Cliente" }
                            th { "Previsão" }
                            th { "Valor" }
                            th { "Ações" }
                        }
                    }
                    tbody {
                        for project in s.items {
                            ProjectRow {
                                key: "{project.id}",
                                project: project.clone(),
                                on_edit: actions.open_edit,
                                on_delete: actions.delete,
                            }
                        }
                    }
                }
            }
        }

        if let Some(form) = s.form {
            ModalOverlay {
                on_close: actions.close,
                ProjectForm {
                    form,
                    on_edit: actions.edit,
                    on_save: actions.save,
                    on_cancel: actions.close,
                }
            }
        }
    }
}

#[component]
fn ProjectRow(project: Project, on_edit: EventHandler<i64>, on_delete: EventHandler<i64>) -> Element {
    let id = project.id;

    rsx! {
        tr {
            td {
                strong { "{project.name}" }
                if let Some(description) = project.description {
                    div { class: "muted small", "{description}" }
                }
            }
            td { "{project.kind}" }
            td {
                span {
                    class: "badge badge--{project.status.as_str()}",
                    "{project.status.label()}"
                }
            }
            td { {project.client_name.unwrap_or_else(|| "-".to_string())} }
            td { {format_date(project.target_date)} }
            td { {format_optional_currency(project.estimated_value)} }
            td {
                class: "table__actions",
                button {
                    class: "btn btn--outline btn--small",
                    title: "Editar",
                    onclick: move |_| on_edit.call(id),
                    Icon { icon: FaPen, width: 12, height: 12 }
                }
                button {
                    class: "btn btn--danger btn--small",
                    title: "Excluir",
                    onclick: move |_| on_delete.call(id),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}

#[component]
fn ProjectForm(
    form: FormState<ProjectDraft>,
    on_edit: Callback<DraftEdit<ProjectDraft>>,
    on_save: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let draft = form.draft;

    rsx! {
        form {
            class: "modal__body",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_save.call(());
            },

            h2 { "{form.mode.verb()} Projeto" }

            if let Some(err) = form.error {
                div { class: "form-error", "{err}" }
            }

            div {
                class: "form-field",
                label { r#for: "projeto-nome", "Nome *" }
                input {
                    id: "projeto-nome",
                    r#type: "text",
                    value: draft.name,
                    oninput: bind(on_edit, |d, v| d.name = v),
                }
            }

            div {
                class: "form-field",
                label { r#for: "projeto-descricao", "Descrição" }
                textarea {
                    id: "projeto-descricao",
                    rows: 2,
                    value: draft.description,
                    oninput: bind(on_edit, |d, v| d.description = v),
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { r#for: "projeto-tipo", "Tipo *" }
                    input {
                        id: "projeto-tipo",
                        r#type: "text",
                        value: draft.kind,
                        oninput: bind(on_edit, |d, v| d.kind = v),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "projeto-status", "Status" }
                    select {
                        id: "projeto-status",
                        value: draft.status.as_str(),
                        onchange: bind(on_edit, |d, v| d.status = ProjectStatus::from_wire(&v)),
                        for status in ProjectStatus::SELECTABLE {
                            option {
                                key: "{status.as_str()}",
                                value: status.as_str(),
                                selected: status == draft.status,
                                "{status.label()}"
                            }
                        }
                    }
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { r#for: "projeto-inicio", "Data de início" }
                    input {
                        id: "projeto-inicio",
                        r#type: "date",
                        value: draft.start_date,
                        oninput: bind(on_edit, |d, v| d.start_date = v),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "projeto-prevista", "Data prevista" }
                    input {
                        id: "projeto-prevista",
                        r#type: "date",
                        value: draft.target_date,
                        oninput: bind(on_edit, |d, v| d.target_date = v),
                    }
                }
            }

            div {
                class: "form-field",
                label { r#for: "projeto-valor", "Valor estimado (R$)" }
                input {
                    id: "projeto-valor",
                    r#type: "text",
                    placeholder: "0,00",
                    value: draft.estimated_value,
                    oninput: bind(on_edit, |d, v| d.estimated_value = v),
                }
            }

            div {
                class: "form-field",
                label { r#for: "projeto-observacoes", "Observações" }
                textarea {
                    id: "projeto-observacoes",
                    rows: 2,
                    value: draft.notes,
                    oninput: bind(on_edit, |d, v| d.notes = v),
                }
            }

            div {
                class: "form-actions",
                button {
                    class: "btn btn--outline",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancelar"
                }
                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: form.saving,
                    if form.saving { "Salvando..." } else { "Salvar" }
                }
            }
        }
    }
}
