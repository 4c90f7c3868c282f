//! Error types shared by the backend client, the session flow and the admin list.
//!
//! The `Display` text of [`AuthError`] is what the login and signup forms show
//! verbatim, so the messages here are user-facing.

use crate::validation::Field;

/// Failure of a login or signup attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Account not verified. Please check your email for verification link.")]
    AccountNotVerified,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Please fix the {0} field before submitting")]
    ValidationFailed(Field),
    #[error("Could not reach the server: {0}")]
    Network(String),
}

impl AuthError {
    /// The form field this error belongs to, if any. Errors without a field
    /// are about the request itself and leave the form free to resubmit.
    pub fn field(&self) -> Option<Field> {
        match self {
            AuthError::UsernameTaken => Some(Field::Username),
            AuthError::ValidationFailed(field) => Some(*field),
            AuthError::InvalidCredentials
            | AuthError::AccountNotVerified
            | AuthError::Network(_) => None,
        }
    }
}

/// Failure of a user-collection request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("User {0} cannot be deleted")]
    Protected(String),
    #[error("User {0} is not in the user list")]
    UnknownUser(u64),
    #[error("User {id} was deleted from the primary backend but not the secondary one: {reason}")]
    PartialDelete { id: u64, reason: String },
}

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Request(err.0)
    }
}

/// Failure while loading or validating [`crate::AppConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
