//! API client errors

use thiserror::Error;

/// Errors that can occur when talking to the council API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// 401 or 403: the token was rejected
    #[error("Unauthorized (status {status})")]
    Unauthorized { status: u16 },

    /// Any other non-2xx response
    #[error("API error {status}: {}", message.as_deref().unwrap_or("Unknown error"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    /// The body was JSON but not the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// 401/403 end the session
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized { status } | ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

/// Result type alias for API calls
pub type ClientResult<T> = Result<T, ClientError>;
