//! Hosted chat widget embed and the two chat screens.
//!
//! The widget is mounted into an element this crate renders and owns nothing
//! else: switching between direct messages and the community room is a button
//! in our own header, not a node inserted into the widget's DOM.

use api::{
    mount_script, unmount_script, ChatWidgetProps, CommunityChatProps, DirectChatProps, Identity,
    MountReport, Transition,
};
use dioxus::prelude::*;

use crate::icons::{FaHouse, FaUsers};
use crate::session::{transition, use_app, use_session, LogoutButton};
use crate::Icon;

const CHAT_WIDGET_JS: Asset = asset!("/assets/chat_widget.js");
const CHAT_MOUNT_ID: &str = "chat-widget";

/// Mount point for the hosted chat widget. Loads the bridge and the vendor
/// SDK, mounts once both are ready and unmounts when the component goes away.
#[component]
pub fn ChatEmbed(widget: ChatWidgetProps) -> Element {
    let app = use_app();
    let mut mount_error = use_signal(|| Option::<String>::None);
    let script = mount_script(
        &CHAT_WIDGET_JS.to_string(),
        &app.config.chat.sdk_url,
        CHAT_MOUNT_ID,
        &widget,
    );

    use_effect(move || {
        let script = script.clone();
        spawn(async move {
            let mut eval = document::eval(&script);
            let result = match eval.recv::<MountReport>().await {
                Ok(report) => report.into_result(),
                Err(e) => Err(format!("{e:?}")),
            };
            match result {
                Ok(()) => {
                    tracing::info!("Chat widget mounted");
                    mount_error.set(None);
                }
                Err(e) => {
                    tracing::error!("Chat widget failed to mount: {}", e);
                    mount_error.set(Some(e));
                }
            }
        });
    });
    use_drop(|| {
        document::eval(&unmount_script(CHAT_MOUNT_ID));
    });

    rsx! {
        if let Some(err) = mount_error() {
            div { class: "error chat-error", "Chat is unavailable: {err}" }
        }
        div { id: CHAT_MOUNT_ID, class: "chat-widget" }
    }
}

/// Direct messages for the logged-in user.
#[component]
pub fn DirectMessages(identity: Identity) -> Element {
    let app = use_app();
    let mut session = use_session();
    let widget = ChatWidgetProps::Direct(DirectChatProps::new(&app.config.chat, &identity));

    rsx! {
        div {
            class: "chat-page",
            header {
                class: "chat-header",
                span { class: "chat-title", "Direct Messages" }
                button {
                    class: "chat-nav",
                    title: "Community chat",
                    onclick: move |_| transition(&mut session, Transition::OpenCommunity),
                    Icon { icon: FaUsers, width: 18, height: 18 }
                }
                LogoutButton { class: "chat-logout" }
            }
            ChatEmbed { widget }
        }
    }
}

/// The shared community room.
#[component]
pub fn CommunityRoom(identity: Identity) -> Element {
    let app = use_app();
    let mut session = use_session();
    let widget = ChatWidgetProps::Community(CommunityChatProps::new(&app.config.chat, &identity));

    rsx! {
        div {
            class: "chat-page community-page",
            header {
                class: "chat-header",
                button {
                    class: "chat-nav",
                    title: "Back to direct messages",
                    onclick: move |_| transition(&mut session, Transition::OpenDirectMessages),
                    Icon { icon: FaHouse, width: 18, height: 18 }
                }
                span { class: "chat-title", "Community Chat" }
                LogoutButton { class: "chat-logout" }
            }
            ChatEmbed { widget }
        }
    }
}
