use api::Material;
use dioxus::prelude::*;
use store::{format_optional_currency, FormState, MaterialDraft, StockLevel};

use super::ModalOverlay;
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::{bind, use_collection, DraftEdit, Icon, Toast};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Material list with stock badges and its create/edit form.
#[component]
pub fn MaterialsView() -> Element {
    let (state, actions) = use_collection::<Material>();
    let s = state();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        Toast { notice: s.notice, on_dismiss: actions.dismiss }

        div {
            class: "page",
            div {
                class: "page__header",
                h1 { "Materiais" }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| actions.open_new.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " Novo Material"
                }
            }

            if let Some(err) = s.error {
                div { class: "form-error", "{err}" }
            }

            if s.loading && s.items.is_empty() {
                p { class: "muted", "Carregando..." }
            } else if s.items.is_empty() {
                p { class: "muted", "Nenhum material cadastrado." }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Nome" }
                            th { "Tipo" }
                            th { "Preço Unit." }
                            th { "Estoque" }
                            th { "Fornecedor" }
                            th { "Ações" }
                        }
                    }
                    tbody {
                        for material in s.items {
                            MaterialRow {
                                key: "{material.id}",
                                material: material.clone(),
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
                MaterialForm {
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
fn MaterialRow(material: Material, on_edit: EventHandler<i64>, on_delete: EventHandler<i64>) -> Element {
    let id = material.id;
    let level = StockLevel::of(material.stock);

    rsx! {
        tr {
            td {
                strong { "{material.name}" }
                if let Some(spec) = material.specification {
                    div { class: "muted small", "{spec}" }
                }
            }
            td { "{material.kind}" }
            td { {format_optional_currency(material.unit_price)} }
            td {
                span {
                    class: "{level.css_class()}",
                    "{material.stock} {material.unit}"
                }
            }
            td { {material.supplier.unwrap_or_else(|| "-".to_string())} }
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
fn MaterialForm(
    form: FormState<MaterialDraft>,
    on_edit: Callback<DraftEdit<MaterialDraft>>,
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

            h2 { "{form.mode.verb()} Material" }

            if let Some(err) = form.error {
                div { class: "form-error", "{err}" }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { r#for: "material-nome", "Nome *" }
                    input {
                        id: "material-nome",
                        r#type: "text",
                        value: draft.name,
                        oninput: bind(on_edit, |d, v| d.name = v),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "material-tipo", "Tipo *" }
                    input {
                        id: "material-tipo",
                        r#type: "text",
                        value: draft.kind,
                        oninput: bind(on_edit, |d, v| d.kind = v),
                    }
                }
            }

            div {
                class: "form-field",
                label { r#for: "material-especificacoes", "Especificações" }
                textarea {
                    id: "material-especificacoes",
                    rows: 2,
                    value: draft.specification,
                    oninput: bind(on_edit, |d, v| d.specification = v),
                }
            }

            div {
                class: "form-row",
                div {
                    class: "form-field",
                    label { r#for: "material-preco", "Preço unitário (R$)" }
                    input {
                        id: "material-preco",
                        r#type: "text",
                        placeholder: "0,00",
                        value: draft.unit_price,
                        oninput: bind(on_edit, |d, v| d.unit_price = v),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "material-estoque", "Estoque" }
                    input {
                        id: "material-estoque",
                        r#type: "number",
                        min: "0",
                        value: draft.stock,
                        oninput: bind(on_edit, |d, v| d.stock = v),
                    }
                }
                div {
                    class: "form-field",
                    label { r#for: "material-unidade", "Unidade" }
                    input {
                        id: "material-unidade",
                        r#type: "text",
                        placeholder: "un",
                        value: draft.unit,
                        oninput: bind(on_edit, |d, v| d.unit = v),
                    }
                }
            }

            div {
                class: "form-field",
                label { r#for: "material-fornecedor", "Fornecedor" }
                input {
                    id: "material-fornecedor",
                    r#type: "text",
                    value: draft.supplier,
                    oninput: bind(on_edit, |d, v| d.supplier = v),
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
