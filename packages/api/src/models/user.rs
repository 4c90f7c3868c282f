//! # Users as seen by the front end
//!
//! ## [`Identity`]
//!
//! The authenticated user carried through a session. It is built from the
//! backend's login/signup response with the secret added locally, because the
//! backend never echoes it back. Fields the front end does not know about are
//! kept in [`Identity::extra`] so nothing the server sent is lost. The `id` is
//! kept as the raw JSON value; backends disagree on whether it is a number or
//! a string.
//!
//! ## [`UserRecord`]
//!
//! One row of the backend's user collection, shown on the admin screen.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Username that can never be deleted from the admin screen.
pub const PROTECTED_USERNAME: &str = "admin";

/// Authenticated user, owned by the session until logout or reload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    #[serde(default)]
    pub id: Option<Value>,
    pub username: String,
    pub secret: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// Identity with only the submitted username and secret.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            secret: secret.into(),
            extra: Map::new(),
        }
    }

    /// Build an identity from a backend response body.
    ///
    /// The body must be a JSON object. `secret` always overrides whatever the
    /// body carried; `username` is filled in when the body has no string
    /// username. Returns `None` for anything that is not an object.
    pub fn from_response(body: Value, username: &str, secret: &str) -> Option<Self> {
        let Value::Object(mut fields) = body else {
            return None;
        };
        fields.insert("secret".to_string(), Value::String(secret.to_string()));
        if !matches!(fields.get("username"), Some(Value::String(_))) {
            fields.insert("username".to_string(), Value::String(username.to_string()));
        }
        serde_json::from_value(Value::Object(fields)).ok()
    }

    /// A server field not modelled explicitly.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// One entry in the backend user collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl UserRecord {
    /// Whether the admin screen offers a delete control for this user.
    pub fn can_delete(&self) -> bool {
        self.username != PROTECTED_USERNAME
    }

    /// "First Last", or the username when both names are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_keeps_secret_and_server_fields() {
        let body = json!({ "id": 1, "username": "alice", "is_online": true });
        let identity = Identity::from_response(body, "alice", "secret123").unwrap();
        assert_eq!(identity.id, Some(json!(1)));
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.secret, "secret123");
        assert_eq!(identity.field("is_online"), Some(&json!(true)));
    }

    #[test]
    fn test_identity_accepts_any_id_shape() {
        let body = json!({ "id": "abc123", "username": "alice" });
        let identity = Identity::from_response(body, "alice", "pw").unwrap();
        assert_eq!(identity.id, Some(json!("abc123")));

        let body = json!({ "id": null, "username": "alice" });
        let identity = Identity::from_response(body, "alice", "pw").unwrap();
        assert_eq!(identity.id, None);
    }

    #[test]
    fn test_identity_replaces_unusable_username() {
        for username in [json!(null), json!(42), json!({ "first": "a" })] {
            let body = json!({ "id": 5, "username": username });
            let identity = Identity::from_response(body, "dora", "pw").unwrap();
            assert_eq!(identity.username, "dora");
        }
        assert_eq!(Identity::new("dora", "pw").username, "dora");
    }

    #[test]
    fn test_identity_secret_overrides_body() {
        let body = json!({ "id": 7, "username": "bob", "secret": "hashed" });
        let identity = Identity::from_response(body, "bob", "plain").unwrap();
        assert_eq!(identity.secret, "plain");
        assert!(identity.field("secret").is_none());
    }

    #[test]
    fn test_identity_falls_back_to_submitted_username() {
        let identity = Identity::from_response(json!({ "id": 3 }), "carol", "pw").unwrap();
        assert_eq!(identity.username, "carol");
    }

    #[test]
    fn test_identity_rejects_non_objects() {
        assert!(Identity::from_response(json!(null), "a", "b").is_none());
        assert!(Identity::from_response(json!("ok"), "a", "b").is_none());
        assert!(Identity::from_response(json!([1, 2]), "a", "b").is_none());
    }

    #[test]
    fn test_admin_is_not_deletable() {
        let admin = UserRecord {
            id: 1,
            username: "admin".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert!(!admin.can_delete());
        assert_eq!(admin.display_name(), "admin");

        let other = UserRecord {
            username: "Admin".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            ..admin
        };
        assert!(other.can_delete());
        assert_eq!(other.display_name(), "Ada Lovelace");
    }
}
