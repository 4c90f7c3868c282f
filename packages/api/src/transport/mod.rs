//! # Transport — how requests reach the REST backend
//!
//! [`BackendClient`](crate::BackendClient) builds [`Request`]s and interprets
//! [`Response`]s; a [`Transport`] only moves them. Two implementations:
//!
//! | Type | Use |
//! |------|-----|
//! | [`HttpTransport`] | `reqwest`, in the browser (fetch) and natively |
//! | [`MemoryTransport`] | an in-process imitation of the backend, for tests and offline demos |

use std::future::Future;

pub use reqwest::Method;
use serde_json::Value;

use crate::error::TransportError;

mod http;
pub use http::HttpTransport;

mod memory;
pub use memory::MemoryTransport;

/// A JSON request against an absolute URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: Some(body),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            url: url.into(),
            body: None,
        }
    }
}

/// Status and decoded JSON body. `body` is `None` when the response had no
/// body or it was not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Option<Value>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async trait for sending a request to the backend.
pub trait Transport {
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>>;
}
