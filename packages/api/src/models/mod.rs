//! Data models for the application.

mod auth;
mod user;

pub use auth::{Credentials, SignupForm};
pub use user::{Identity, UserRecord, PROTECTED_USERNAME};
