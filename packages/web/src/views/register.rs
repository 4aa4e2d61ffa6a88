//! Registration page view with name/email/password form.

use dioxus::prelude::*;
use store::{entry_redirect, Page, RegisterForm};
use ui::{use_auth, use_session};

/// Register page component.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let session = use_session();
    let nav = use_navigator();
    let mut form = use_signal(RegisterForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, redirect to the dashboard
    if !auth().loading {
        if let Some(target) = entry_redirect(&*session, Page::Register) {
            nav.replace(target.path());
        }
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);

            let account = form();
            if let Err(e) = account.validate() {
                error.set(Some(e.to_string()));
                return;
            }

            loading.set(true);
            match session
                .register(&account.name, &account.email, &account.password)
                .await
            {
                Ok(user) => {
                    tracing::info!("Registered {}", user.email);
                    nav.replace(Page::Dashboard.path());
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Criar conta" }
                p { class: "muted", "Cadastre-se no Portal ALLUPRO" }

                form {
                    onsubmit: handle_register,

                    if let Some(err) = error() {
                        div { class: "form-error", "{err}" }
                    }

                    input {
                        r#type: "text",
                        placeholder: "Nome",
                        value: form().name,
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                    }

                    input {
                        r#type: "email",
                        placeholder: "Email",
                        value: form().email,
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }

                    input {
                        r#type: "password",
                        placeholder: "Senha",
                        value: form().password,
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }

                    button {
                        class: "btn btn--primary",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Criando conta..." } else { "Cadastrar" }
                    }
                }

                p {
                    class: "muted",
                    "Já tem conta? "
                    Link { to: Page::Login.path(), "Entrar" }
                }
            }
        }
    }
}
