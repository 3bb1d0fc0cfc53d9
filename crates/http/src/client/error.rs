//! Failures talking to the auth backend

use thiserror::Error;
use vigil_core::SessionError;

/// Why a call to the session endpoint did not produce a session
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend could not be reached, or the request timed out
    #[error("Session request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any non-success status without a dedicated variant
    #[error("Auth backend returned {status}: {message}")]
    ServerError { status: u16, message: String },

    /// 401: the credentials sent with the request were not accepted
    #[error("Session credentials rejected: {0}")]
    AuthenticationFailed(String),

    /// 404: usually a wrong base URL or session path
    #[error("Session endpoint not found: {0}")]
    NotFound(String),

    /// 400
    #[error("Session request rejected as malformed: {0}")]
    BadRequest(String),

    /// 403
    #[error("Session access denied: {0}")]
    Forbidden(String),

    /// The body was neither a session object nor `null`
    #[error("Invalid session payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client was built with unusable settings
    #[error("Invalid auth client configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Map a non-success status from the session endpoint, keeping the body as the message
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            code => Self::ServerError {
                status: code,
                message,
            },
        }
    }
}

impl From<ClientError> for SessionError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Serialization(e) => Self::Decode(e),
            ClientError::Configuration(message) => Self::Config(message),
            other => Self::Fetch(other.to_string()),
        }
    }
}
