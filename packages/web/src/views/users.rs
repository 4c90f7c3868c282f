use dioxus::prelude::*;
use ui::UserList;

#[component]
pub fn Users() -> Element {
    rsx! {
        document::Title { "Users" }
        UserList {}
    }
}
