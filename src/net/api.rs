//! Shared HTTP client for the admin backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: sends return [`ApiError::Unavailable`] since these endpoints
//! are only meaningful in the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request is assembled by [`ApiClient::prepare`], which re-reads the
//! durable token and attaches it as a bearer credential. There is no retry and
//! no response interception: failures reach the caller as-is.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{LoginRequest, LoginResponse, VerificationResult, VerifyTokenRequest};
use crate::state::verification::TokenVerifier;
use crate::util::storage::{SharedStore, TOKEN_KEY};

pub const LOGIN_PATH: &str = "/auth/login";
pub const VERIFY_TOKEN_PATH: &str = "/auth/verify-token";

/// Maximum number of error body characters surfaced to callers.
#[cfg(any(test, feature = "csr"))]
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully resolved request, ready for transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Request-issuing component shared by pages and the verification query.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    store: SharedStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: SharedStore) -> Self {
        Self {
            base_url: base_url.into(),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL and attach headers for the current token.
    pub fn prepare(&self, method: Method, path: &str) -> PreparedRequest {
        let token = self.store.get(TOKEN_KEY);
        PreparedRequest {
            method,
            url: join_url(&self.base_url, path),
            headers: request_headers(token.as_deref()),
        }
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails, the status is not 2xx, or
    /// the body does not decode into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.prepare(Method::Get, path);
        self.send_json(request, None).await
    }

    /// `POST` a JSON body and decode a JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`], plus [`ApiError::Encode`] when `body`
    /// cannot be serialized.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let payload = encode_body(body)?;
        let request = self.prepare(Method::Post, path);
        self.send_json(request, Some(payload)).await
    }

    /// `PUT` a JSON body and decode a JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::post_json`].
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let payload = encode_body(body)?;
        let request = self.prepare(Method::Put, path);
        self.send_json(request, Some(payload)).await
    }

    /// `DELETE` a resource, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the status is not 2xx.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.prepare(Method::Delete, path);
        self.send(request, None).await.map(|_| ())
    }

    /// Exchange credentials for a user record and bearer token.
    ///
    /// # Errors
    ///
    /// Propagates the underlying request error unchanged.
    pub async fn login<U: DeserializeOwned>(&self, email: &str, password: &str) -> Result<LoginResponse<U>, ApiError> {
        let body = LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.post_json(LOGIN_PATH, &body).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: PreparedRequest, body: Option<String>) -> Result<T, ApiError> {
        let text = self.send(request, body).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Transmit `request` and return the raw response body of a 2xx reply.
    #[cfg_attr(not(feature = "csr"), allow(unused_variables, clippy::unused_self))]
    async fn send(&self, request: PreparedRequest, body: Option<String>) -> Result<String, ApiError> {
        log::debug!("{} {}", request.method.as_str(), request.url);
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match body {
                Some(payload) => builder.body(payload),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Encode(format!("failed to build request: {e}")))?;

            let response = built.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            settle_response(response.status(), response.text().await)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }
}

impl TokenVerifier for ApiClient {
    async fn verify(&self, token: &str) -> Result<VerificationResult, ApiError> {
        self.post_json(VERIFY_TOKEN_PATH, &VerifyTokenRequest { token }).await
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(format!("failed to encode request: {e}")))
}

/// Join a base URL and a path with exactly one `/` between them.
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_owned()
    } else {
        format!("{base}/{path}")
    }
}

/// Headers every request carries, plus the bearer credential when `token` is present.
fn request_headers(token: Option<&str>) -> Vec<(&'static str, String)> {
    let mut headers = vec![("Content-Type", "application/json".to_owned())];
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        headers.push(("Authorization", format!("Bearer {token}")));
    }
    headers
}

/// Map a received status and body read into the caller's result. A body that
/// cannot be read is a network failure regardless of status.
#[cfg(any(test, feature = "csr"))]
fn settle_response<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> Result<String, ApiError> {
    let text = body.map_err(|e| ApiError::Network(format!("failed to read response body: {e}")))?;
    if (200..300).contains(&status) {
        Ok(text)
    } else {
        Err(status_error(status, &text))
    }
}

#[cfg(any(test, feature = "csr"))]
fn status_error(status: u16, body: &str) -> ApiError {
    let message: String = body.trim().chars().take(MAX_ERROR_CHARS).collect();
    ApiError::Status { status, message }
}
