//! Login page view with email/password form.

use dioxus::prelude::*;
use store::{entry_redirect, LoginForm, Page};
use ui::{use_auth, use_session};

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let session = use_session();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, redirect to the dashboard
    if !auth().loading {
        if let Some(target) = entry_redirect(&*session, Page::Login) {
            nav.replace(target.path());
        }
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let session = session.clone();
        spawn(async move {
            error.set(None);

            let credentials = form();
            if let Err(e) = credentials.validate() {
                error.set(Some(e.to_string()));
                return;
            }

            loading.set(true);
            match session.login(&credentials.email, &credentials.password).await {
                Ok(_) => {
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
                h1 { "Entrar" }
                p { class: "muted", "Acesse o Portal ALLUPRO" }

                form {
                    onsubmit: handle_login,

                    if let Some(err) = error() {
                        div { class: "form-error", "{err}" }
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
                        if loading() { "Entrando..." } else { "Entrar" }
                    }
                }

                p {
                    class: "muted",
                    "Não tem conta? "
                    Link { to: Page::Register.path(), "Cadastre-se" }
                }
            }
        }
    }
}
