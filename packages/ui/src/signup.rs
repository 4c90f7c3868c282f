//! Signup form. Password and email are re-checked on every keystroke.

use api::{validate_email, validate_password, Field, SignupForm, Transition};
use dioxus::prelude::*;

use crate::session::{transition, use_app, use_notice, use_session};

#[component]
pub fn SignupPage() -> Element {
    let app = use_app();
    let mut session = use_session();
    let mut notice = use_notice();

    let mut username = use_signal(String::new);
    let mut secret = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut username_error = use_signal(|| Option::<String>::None);
    // Request failures that say nothing about the form; never blocks a retry.
    let mut submit_error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let password_error = use_memo(move || validate_password(&secret()));
    let suffix = app.config.signup.email_suffix.clone();
    let email_error = use_memo(move || validate_email(&email(), &suffix));

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        if username_error().is_some() || password_error().is_some() || email_error().is_some() {
            return;
        }

        submit_error.set(None);
        let client = app.client.clone();
        let form = SignupForm {
            username: username(),
            secret: secret(),
            email: email(),
            first_name: first_name(),
            last_name: last_name(),
        };
        spawn(async move {
            loading.set(true);
            let result = client.signup(&form).await;
            loading.set(false);
            match result {
                Ok(outcome) => {
                    notice.set(Some(outcome.notice.to_string()));
                    transition(&mut session, Transition::AuthSucceeded(outcome.identity));
                }
                Err(e) => match e.field() {
                    Some(Field::Username) => username_error.set(Some(e.to_string())),
                    Some(_) => tracing::warn!("Signup blocked: {}", e),
                    None => submit_error.set(Some(e.to_string())),
                },
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card",
                form {
                    onsubmit: handle_signup,
                    div { class: "title", "Sign Up" }

                    if let Some(err) = submit_error() {
                        div { class: "error", "{err}" }
                    }

                    if let Some(err) = username_error() {
                        div { class: "error", "{err}" }
                    }
                    input {
                        r#type: "text",
                        name: "username",
                        placeholder: "Username",
                        required: true,
                        value: username(),
                        oninput: move |evt: FormEvent| {
                            username.set(evt.value());
                            username_error.set(None);
                        },
                    }

                    if let Some(err) = password_error() {
                        div { class: "error", "{err}" }
                    }
                    input {
                        r#type: "password",
                        name: "secret",
                        placeholder: "Password",
                        required: true,
                        value: secret(),
                        oninput: move |evt: FormEvent| secret.set(evt.value()),
                    }

                    if let Some(err) = email_error() {
                        div { class: "error", "{err}" }
                    }
                    input {
                        r#type: "text",
                        name: "email",
                        placeholder: "Email",
                        required: true,
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }

                    input {
                        r#type: "text",
                        name: "first_name",
                        placeholder: "First name",
                        required: true,
                        value: first_name(),
                        oninput: move |evt: FormEvent| first_name.set(evt.value()),
                    }
                    input {
                        r#type: "text",
                        name: "last_name",
                        placeholder: "Last name",
                        required: true,
                        value: last_name(),
                        oninput: move |evt: FormEvent| last_name.set(evt.value()),
                    }
                    button {
                        id: "submit",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "SIGNING UP..." } else { "SIGN UP" }
                    }
                }
                div {
                    "Already have an account? "
                    button {
                        class: "link-button",
                        onclick: move |_| transition(&mut session, Transition::ToggleSignup),
                        "Login"
                    }
                }
            }
        }
    }
}
