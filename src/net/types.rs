//! Wire DTOs for the auth endpoints.
//!
//! DESIGN
//! ======
//! The session layer is generic over the user record; [`AdminUser`] is the
//! shape this application logs in with. Unknown fields are ignored so backend
//! additions never invalidate a stored session.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The logged-in administrator as returned by `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Credentials body for `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload: the user record plus its bearer token.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse<U> {
    pub user: U,
    pub token: String,
}

/// Body for `POST /auth/verify-token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyTokenRequest<'a> {
    pub token: &'a str,
}

/// Backend verdict on a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(rename = "valid", alias = "isValid")]
    pub is_valid: bool,
}
