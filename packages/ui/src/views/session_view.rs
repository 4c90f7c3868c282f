use api::{AuthView, ChatView, SessionState};
use dioxus::prelude::*;

use crate::chat::{CommunityRoom, DirectMessages};
use crate::login::LoginPage;
use crate::session::use_session;
use crate::signup::SignupPage;
use crate::views::SuccessModal;

/// Renders the screen for the current session state and keeps the document
/// title in step with it.
#[component]
pub fn SessionView() -> Element {
    let session = use_session();
    let state = session();
    let title = state.title();

    let screen = match state {
        SessionState::LoggedOut(AuthView::Login) => rsx! { LoginPage {} },
        SessionState::LoggedOut(AuthView::Signup) => rsx! { SignupPage {} },
        SessionState::LoggedIn {
            identity,
            view: ChatView::DirectChat,
        } => rsx! { DirectMessages { identity } },
        SessionState::LoggedIn {
            identity,
            view: ChatView::Community,
        } => rsx! { CommunityRoom { identity } },
    };

    rsx! {
        document::Title { "{title}" }
        {screen}
        SuccessModal {}
    }
}
