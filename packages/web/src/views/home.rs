use dioxus::prelude::*;
use ui::views::SessionView;

/// Login, signup and the chat screens all live on `/`; which one shows is
/// session state, not a route, so a reload always starts at the login form.
#[component]
pub fn Home() -> Element {
    rsx! {
        SessionView {}
    }
}
