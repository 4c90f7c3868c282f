use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::error::TransportError;
use crate::models::UserRecord;
use crate::transport::{Method, Request, Response, Transport};

#[derive(Debug, Clone)]
struct StoredUser {
    record: UserRecord,
    secret: String,
    verified: bool,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<StoredUser>,
    next_id: u64,
    secondary_deleted: Vec<u64>,
    offline: bool,
    secondary_offline: bool,
    requests: Vec<(Method, String)>,
}

/// In-memory imitation of the REST backend (and its secondary mirror).
///
/// Answers the same routes with the same status codes: unverified accounts get
/// 401 on login, duplicate usernames get 400 on signup, unknown ids get 404.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<State>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a verified user and return its record.
    pub fn add_user(&self, username: &str, secret: &str) -> UserRecord {
        self.insert(username, secret, format!("{username}@greenriver.edu"), true)
    }

    /// Mark an account as verified, as the emailed link would.
    pub fn verify(&self, username: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state
            .users
            .iter_mut()
            .find(|u| u.record.username == username)
        {
            user.verified = true;
        }
    }

    /// Make every request fail before reaching the backend.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Make only requests to the secondary backend fail.
    pub fn set_secondary_offline(&self, offline: bool) {
        self.state.lock().unwrap().secondary_offline = offline;
    }

    pub fn users(&self) -> Vec<UserRecord> {
        let state = self.state.lock().unwrap();
        state.users.iter().map(|u| u.record.clone()).collect()
    }

    /// Ids deleted through the secondary backend.
    pub fn secondary_deleted(&self) -> Vec<u64> {
        self.state.lock().unwrap().secondary_deleted.clone()
    }

    /// Every request received, as `(method, path)`.
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.state.lock().unwrap().requests.clone()
    }

    fn insert(&self, username: &str, secret: &str, email: String, verified: bool) -> UserRecord {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let record = UserRecord {
            id: state.next_id,
            username: username.to_string(),
            email,
            first_name: String::new(),
            last_name: String::new(),
        };
        state.users.push(StoredUser {
            record: record.clone(),
            secret: secret.to_string(),
            verified,
        });
        record
    }

    fn handle(&self, method: &Method, path: &str, body: Option<&Value>) -> Response {
        let mut state = self.state.lock().unwrap();
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        match (method.as_str(), segments.as_slice()) {
            ("POST", ["login"]) => {
                let username = str_field(body, "username");
                let secret = str_field(body, "secret");
                match state
                    .users
                    .iter()
                    .find(|u| u.record.username == username && u.secret == secret)
                {
                    Some(user) if !user.verified => status(401),
                    Some(user) => ok(json!(user.record)),
                    None => status(403),
                }
            }
            ("POST", ["signup"]) => {
                let username = str_field(body, "username");
                if username.is_empty() || state.users.iter().any(|u| u.record.username == username)
                {
                    return status(400);
                }
                state.next_id += 1;
                let record = UserRecord {
                    id: state.next_id,
                    username: username.to_string(),
                    email: str_field(body, "email").to_string(),
                    first_name: str_field(body, "first_name").to_string(),
                    last_name: str_field(body, "last_name").to_string(),
                };
                state.users.push(StoredUser {
                    record: record.clone(),
                    secret: str_field(body, "secret").to_string(),
                    verified: false,
                });
                ok(json!(record))
            }
            ("GET", ["users"]) => {
                let users: Vec<&UserRecord> = state.users.iter().map(|u| &u.record).collect();
                ok(json!(users))
            }
            ("DELETE", ["users", id]) => {
                let Ok(id) = id.parse::<u64>() else {
                    return status(400);
                };
                let before = state.users.len();
                state.users.retain(|u| u.record.id != id);
                if state.users.len() < before {
                    ok(json!({ "deleted": id }))
                } else {
                    status(404)
                }
            }
            ("DELETE", ["other-users", id]) => match id.parse::<u64>() {
                Ok(id) => {
                    state.secondary_deleted.push(id);
                    ok(json!({ "deleted": id }))
                }
                Err(_) => status(400),
            },
            _ => status(404),
        }
    }
}

impl Transport for MemoryTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| TransportError(format!("invalid url {}: {}", request.url, e)))?;
        let path = url.path().to_string();

        {
            let mut state = self.state.lock().unwrap();
            state.requests.push((request.method.clone(), path.clone()));
            if state.offline {
                return Err(TransportError("connection refused".to_string()));
            }
            if state.secondary_offline && path.starts_with("/other-users/") {
                return Err(TransportError("connection refused".to_string()));
            }
        }

        Ok(self.handle(&request.method, &path, request.body.as_ref()))
    }
}

fn str_field<'a>(body: Option<&'a Value>, name: &str) -> &'a str {
    body.and_then(|b| b.get(name))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn ok(body: Value) -> Response {
    Response {
        status: 200,
        body: Some(body),
    }
}

fn status(status: u16) -> Response {
    Response { status, body: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes() {
        let transport = MemoryTransport::new();
        let alice = transport.add_user("alice", "secret123");

        let response = transport
            .send(Request::post(
                "http://backend/login",
                json!({ "username": "alice", "secret": "secret123" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body.unwrap()["id"], json!(alice.id));

        let response = transport
            .send(Request::delete(format!("http://backend/users/{}", alice.id)))
            .await
            .unwrap();
        assert!(response.is_success());
        assert!(transport.users().is_empty());

        let response = transport
            .send(Request::get("http://backend/nothing"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_offline() {
        let transport = MemoryTransport::new();
        transport.set_offline(true);
        assert!(transport.send(Request::get("http://backend/users")).await.is_err());
        assert_eq!(transport.requests(), vec![(Method::GET, "/users".to_string())]);
    }
}
