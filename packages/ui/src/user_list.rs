//! Admin table of backend users with per-row delete.

use api::{UserDirectory, UserRecord};
use dioxus::prelude::*;

use crate::session::use_app;

#[component]
pub fn UserList() -> Element {
    let app = use_app();
    let mut directory = use_signal(UserDirectory::new);
    let mut error = use_signal(|| Option::<String>::None);

    let client = app.client.clone();
    let _loader = use_resource(move || {
        let client = client.clone();
        async move {
            let mut updated = UserDirectory::clone(&directory.peek());
            match updated.refresh(&client).await {
                Ok(()) => error.set(None),
                Err(e) => error.set(Some(e.to_string())),
            }
            directory.set(updated);
        }
    });

    let client = app.client.clone();
    let on_delete = EventHandler::new(move |id: u64| {
        let client = client.clone();
        spawn(async move {
            let mut updated = UserDirectory::clone(&directory.peek());
            let result = updated.delete(&client, id).await;
            directory.set(updated);
            match result {
                Ok(()) => error.set(None),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    let users = directory().users().to_vec();

    rsx! {
        div {
            class: "user-list-container",
            h2 { "User List" }

            if let Some(err) = error() {
                div { class: "error", "{err}" }
            }

            table {
                class: "user-table",
                thead {
                    tr {
                        th { "ID" }
                        th { "Username" }
                        th { "Email" }
                        th { "First Name" }
                        th { "Last Name" }
                        th { "Delete" }
                    }
                }
                tbody {
                    for user in users {
                        UserRow { key: "{user.id}", user, on_delete }
                    }
                }
            }
        }
    }
}

#[component]
fn UserRow(user: UserRecord, on_delete: EventHandler<u64>) -> Element {
    let id = user.id;

    rsx! {
        tr {
            td { "{user.id}" }
            td { "{user.username}" }
            td { "{user.email}" }
            td { "{user.first_name}" }
            td { "{user.last_name}" }
            td {
                if user.can_delete() {
                    button {
                        class: "delete-button",
                        onclick: move |_| on_delete.call(id),
                        "Delete"
                    }
                }
            }
        }
    }
}
