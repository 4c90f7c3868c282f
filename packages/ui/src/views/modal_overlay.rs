use dioxus::prelude::*;

use crate::session::use_notice;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Shows the pending notice, if any, until the user closes it.
#[component]
pub fn SuccessModal() -> Element {
    let mut notice = use_notice();

    let Some(message) = notice() else {
        return rsx! {};
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| notice.set(None),
            h2 { "Success!" }
            p { "{message}" }
            button {
                class: "modal-close",
                onclick: move |_| notice.set(None),
                "Close"
            }
        }
    }
}
