//! # API crate — everything the messenger front end does that is not drawing
//!
//! The views in `ui` call into this crate for every decision: what to send to
//! the REST backend, how to read its answers, which screen comes next, and what
//! to hand the hosted chat widget. Nothing here depends on Dioxus, so the whole
//! flow is tested natively against [`MemoryTransport`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `messenger.toml`: backend origins, chat project/room, signup email domain |
//! | [`models`] | [`Identity`], [`UserRecord`], form contents |
//! | [`validation`] | Password and email checks run on every keystroke |
//! | [`transport`] | [`Transport`] trait with `reqwest` and in-memory implementations |
//! | [`client`] | [`BackendClient`]: login, signup, user list, delete |
//! | [`session`] | [`SessionState`] machine: Login/Signup/DirectChat/Community |
//! | [`chat`] | Properties for the hosted chat widget |
//! | [`admin`] | [`UserDirectory`] for the admin screen |
//! | [`error`] | Error enums shared by all of the above |

pub mod admin;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;
pub mod validation;

pub use admin::UserDirectory;
pub use chat::{
    mount_script, unmount_script, ChatWidgetProps, CommunityChatProps, DirectChatProps, MountReport,
};
pub use client::{BackendClient, SignupOutcome, SIGNUP_SUCCESS_NOTICE};
pub use config::AppConfig;
pub use error::{ApiError, AuthError, ConfigError, TransportError};
pub use models::{Credentials, Identity, SignupForm, UserRecord};
pub use session::{AuthView, ChatView, InvalidTransition, SessionState, Transition};
pub use transport::{HttpTransport, MemoryTransport, Transport};
pub use validation::{validate_email, validate_password, Field, SignupErrors};

/// The client the browser build talks to the backend with.
pub type HttpClient = BackendClient<HttpTransport>;
