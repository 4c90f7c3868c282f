//! # Backend client — login, signup and the user collection
//!
//! [`BackendClient`] turns form contents into [`Request`]s, sends them through
//! a [`Transport`] and maps every outcome onto the error kinds the views show:
//!
//! | Call | Success | Failure |
//! |------|---------|---------|
//! | [`login`](BackendClient::login) | 2xx + JSON object → [`Identity`] | 401 → [`AuthError::AccountNotVerified`], anything else → [`AuthError::InvalidCredentials`] |
//! | [`signup`](BackendClient::signup) | 2xx → [`SignupOutcome`] | client-side errors → [`AuthError::ValidationFailed`], error status → [`AuthError::UsernameTaken`], no response → [`AuthError::Network`] |
//! | [`fetch_users`](BackendClient::fetch_users) | 2xx + JSON array → `Vec<UserRecord>` | [`ApiError`] |
//! | [`delete_user`](BackendClient::delete_user) / [`delete_secondary`](BackendClient::delete_secondary) | 2xx | [`ApiError`] |
//!
//! Exactly one request is sent per call.

use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::{ApiError, AuthError, TransportError};
use crate::models::{Credentials, Identity, SignupForm, UserRecord};
use crate::transport::{Request, Response, Transport};
use crate::validation::SignupErrors;

/// Shown once after a successful signup.
pub const SIGNUP_SUCCESS_NOTICE: &str =
    "Sign up successful! Please check your email to verify your account.";

/// Result of a successful signup.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupOutcome {
    pub identity: Identity,
    pub notice: &'static str,
}

#[derive(Clone, Debug)]
pub struct BackendClient<T> {
    transport: T,
    base_url: String,
    secondary_url: Option<String>,
    email_suffix: String,
}

impl<T: Transport> BackendClient<T> {
    pub fn new(transport: T, config: &AppConfig) -> Self {
        Self {
            transport,
            base_url: config.backend_url().to_string(),
            secondary_url: config.secondary_url().map(str::to_string),
            email_suffix: config.signup.email_suffix.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary_url.is_some()
    }

    pub fn email_suffix(&self) -> &str {
        &self.email_suffix
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let request = Request::post(
            format!("{}/login", self.base_url),
            json!({
                "username": credentials.username,
                "secret": credentials.secret,
            }),
        );
        let result = login_outcome(self.transport.send(request).await, credentials);
        match &result {
            Ok(identity) => tracing::info!("Logged in as {}", identity.username),
            Err(e) => tracing::warn!("Login for {} rejected: {}", credentials.username, e),
        }
        result
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<SignupOutcome, AuthError> {
        if let Some(field) = SignupErrors::check(form, &self.email_suffix).first() {
            return Err(AuthError::ValidationFailed(field));
        }

        let request = Request::post(
            format!("{}/signup", self.base_url),
            json!({
                "username": form.username,
                "secret": form.secret,
                "email": form.email,
                "first_name": form.first_name,
                "last_name": form.last_name,
            }),
        );
        let result = signup_outcome(self.transport.send(request).await, form);
        match &result {
            Ok(outcome) => tracing::info!("Signed up {}", outcome.identity.username),
            Err(AuthError::Network(e)) => tracing::error!("Signup request failed: {}", e),
            Err(e) => tracing::warn!("Signup for {} rejected: {}", form.username, e),
        }
        result
    }

    pub async fn fetch_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let response = self
            .transport
            .send(Request::get(format!("{}/users", self.base_url)))
            .await?;
        let body = expect_success(response)?;
        serde_json::from_value(body.unwrap_or(Value::Null))
            .map_err(|e| ApiError::Request(format!("malformed user list: {e}")))
    }

    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let response = self
            .transport
            .send(Request::delete(format!("{}/users/{}", self.base_url, id)))
            .await?;
        expect_success(response).map(|_| ())
    }

    /// Delete `id` from the secondary backend. A no-op without one.
    pub async fn delete_secondary(&self, id: u64) -> Result<(), ApiError> {
        let Some(secondary) = &self.secondary_url else {
            return Ok(());
        };
        let response = self
            .transport
            .send(Request::delete(format!("{secondary}/other-users/{id}")))
            .await?;
        expect_success(response).map(|_| ())
    }
}

fn expect_success(response: Response) -> Result<Option<Value>, ApiError> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(ApiError::Status(response.status))
    }
}

/// Interpret the response to a login request.
pub fn login_outcome(
    response: Result<Response, TransportError>,
    credentials: &Credentials,
) -> Result<Identity, AuthError> {
    let response = response.map_err(|_| AuthError::InvalidCredentials)?;
    if response.status == 401 {
        return Err(AuthError::AccountNotVerified);
    }
    if !response.is_success() {
        return Err(AuthError::InvalidCredentials);
    }
    response
        .body
        .and_then(|body| Identity::from_response(body, &credentials.username, &credentials.secret))
        .ok_or(AuthError::InvalidCredentials)
}

/// Interpret the response to a signup request.
///
/// Any 2xx signs the user up. A body that is missing or not an object is
/// replaced by the submitted username and secret.
pub fn signup_outcome(
    response: Result<Response, TransportError>,
    form: &SignupForm,
) -> Result<SignupOutcome, AuthError> {
    let response = response.map_err(|e| AuthError::Network(e.0))?;
    if !response.is_success() {
        return Err(AuthError::UsernameTaken);
    }
    let identity = response
        .body
        .and_then(|body| Identity::from_response(body, &form.username, &form.secret))
        .unwrap_or_else(|| Identity::new(&form.username, &form.secret));
    Ok(SignupOutcome {
        identity,
        notice: SIGNUP_SUCCESS_NOTICE,
    })
}
