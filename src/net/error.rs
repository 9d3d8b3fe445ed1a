//! Error taxonomy for backend requests.

/// Failure of a request issued through [`crate::net::api::ApiClient`].
///
/// `Clone` so a failed verification can be cached and handed to every guard
/// that asks for the same token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("response error: {0}")]
    Decode(String),
    #[error("request error: {0}")]
    Encode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
