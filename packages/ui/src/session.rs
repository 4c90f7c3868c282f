//! Session context and hooks for the UI.

use api::{AppConfig, HttpClient, HttpTransport, SessionState, Transition};
use dioxus::prelude::*;

/// Configuration and backend client shared by every view.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub client: HttpClient,
}

/// Get the current session state.
/// Returns a signal that updates on every screen change, login and logout.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}

/// One-shot notice shown in a modal above whatever screen is current.
pub fn use_notice() -> Signal<Option<String>> {
    use_context::<Signal<Option<String>>>()
}

/// Apply a transition, logging instead of failing when it does not apply.
pub fn transition(session: &mut Signal<SessionState>, transition: Transition) {
    let mut state = session.read().clone();
    match state.apply(transition) {
        Ok(()) => session.set(state),
        Err(e) => tracing::warn!("Ignored session transition: {}", e),
    }
}

/// Provider component that owns the session.
/// Wrap your app with this component; nothing survives a reload.
#[component]
pub fn SessionProvider(config: AppConfig, children: Element) -> Element {
    let session = use_signal(SessionState::default);
    let notice = use_signal(|| Option::<String>::None);

    use_context_provider(|| AppContext {
        client: HttpClient::new(HttpTransport::new(), &config),
        config: config.clone(),
    });
    use_context_provider(|| session);
    use_context_provider(|| notice);

    rsx! {
        {children}
    }
}

/// Button that ends the session and returns to the login screen.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut session = use_session();

    let onclick = move |_| {
        if let Some(identity) = session().identity() {
            tracing::info!("Logging out {}", identity.username);
        }
        transition(&mut session, Transition::Logout);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
