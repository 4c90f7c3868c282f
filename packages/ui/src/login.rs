//! Login form with a link to the signup form.

use api::{Credentials, Transition};
use dioxus::prelude::*;

use crate::session::{transition, use_app, use_session};

#[component]
pub fn LoginPage() -> Element {
    let app = use_app();
    let mut session = use_session();
    let mut username = use_signal(String::new);
    let mut secret = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = app.client.clone();
        let credentials = Credentials::new(username(), secret());
        spawn(async move {
            loading.set(true);
            let result = client.login(&credentials).await;
            loading.set(false);
            match result {
                Ok(identity) => {
                    error.set(None);
                    transition(&mut session, Transition::AuthSucceeded(identity));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card",
                form {
                    onsubmit: handle_login,
                    div { class: "title", "Login" }

                    if let Some(err) = error() {
                        div { class: "error", "{err}" }
                    }

                    input {
                        r#type: "text",
                        name: "username",
                        placeholder: "Username",
                        value: username(),
                        oninput: move |evt: FormEvent| username.set(evt.value()),
                    }
                    input {
                        r#type: "password",
                        name: "secret",
                        placeholder: "Password",
                        value: secret(),
                        oninput: move |evt: FormEvent| secret.set(evt.value()),
                    }
                    button {
                        id: "submit",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "LOGGING IN..." } else { "LOG IN" }
                    }
                }
                div {
                    "Don't have an account? "
                    button {
                        class: "link-button",
                        onclick: move |_| transition(&mut session, Transition::ToggleSignup),
                        "Sign Up"
                    }
                }
            }
        }
    }
}
