use serde::{Deserialize, Serialize};

/// Login form contents. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

/// Signup form contents, sent to the backend as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub secret: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl SignupForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.secret.clone())
    }
}
