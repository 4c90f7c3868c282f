//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const MESSENGER_CSS: Asset = asset!("/assets/messenger.css");

mod session;
pub use session::{transition, use_app, use_notice, use_session, AppContext, LogoutButton, SessionProvider};

mod login;
pub use login::LoginPage;

mod signup;
pub use signup::SignupPage;

mod chat;
pub use chat::{ChatEmbed, CommunityRoom, DirectMessages};

mod user_list;
pub use user_list::UserList;
