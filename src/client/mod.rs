//! Council API Client
//!
//! The portal talks to four JSON endpoints:
//! - `POST /auth/login`
//! - `POST /auth/register`
//! - `GET /user/profile`
//! - `GET /dashboard/`
//!
//! [`PortalApi`] is implemented over reqwest for the terminal client and
//! over gloo-net in the browser. Both share the response rules in
//! [`read_envelope`].

pub mod error;
#[cfg(feature = "native")]
pub mod http;

pub use error::{ClientError, ClientResult};
#[cfg(feature = "native")]
pub use http::{ClientConfig, HttpClient};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::portal::lenient;
use crate::portal::{DashboardData, UserProfile};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const PROFILE_PATH: &str = "/user/profile";
pub const DASHBOARD_PATH: &str = "/dashboard/";

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of a login or register response, whatever the status
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AuthResponse {
    #[serde(skip)]
    pub status: u16,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub error: Option<String>,
}

impl AuthResponse {
    /// Read an auth body; anything unexpected reads as empty
    pub fn from_body(status: u16, body: Value) -> Self {
        let mut response: AuthResponse = serde_json::from_value(body).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Auth response had an unexpected shape");
            AuthResponse::default()
        });
        response.status = status;
        response
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server message, else `error`
    pub fn reason(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

/// The council API as seen by a front end
#[async_trait(?Send)]
pub trait PortalApi {
    /// Auth endpoints hand back their body even when the status is 4xx
    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse>;

    async fn profile(&self, token: &str) -> ClientResult<UserProfile>;

    async fn dashboard(&self, token: &str) -> ClientResult<DashboardData>;
}

/// Parse a body the way every endpoint expects.
///
/// Only `application/json` bodies are parsed; anything else reads as `{}`.
pub fn parse_body(content_type: Option<&str>, body: &str) -> Value {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        return Value::Object(Default::default());
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Response claimed JSON but did not parse");
        Value::Object(Default::default())
    })
}

/// `error`, else `message`
pub fn error_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .map(str::to_string)
}

/// Turn a status and parsed body into the payload or an error
pub fn read_envelope(status: u16, body: Value) -> ClientResult<Value> {
    match status {
        200..=299 => Ok(body),
        401 | 403 => Err(ClientError::Unauthorized { status }),
        _ => Err(ClientError::Api {
            status,
            message: error_message(&body),
        }),
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Join a base URL and an endpoint path without doubling slashes
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body_content_type() {
        assert_eq!(
            parse_body(Some("application/json; charset=utf-8"), r#"{"a":1}"#),
            json!({"a": 1})
        );
        assert_eq!(parse_body(Some("text/html"), "<h1>Bad Gateway</h1>"), json!({}));
        assert_eq!(parse_body(None, r#"{"a":1}"#), json!({}));
        assert_eq!(parse_body(Some("application/json"), "{oops"), json!({}));
    }

    #[test]
    fn test_envelope() {
        assert_eq!(read_envelope(200, json!([1])), Ok(json!([1])));
        assert_eq!(
            read_envelope(401, json!({})),
            Err(ClientError::Unauthorized { status: 401 })
        );
        assert_eq!(
            read_envelope(403, json!({"message": "Forbidden"})),
            Err(ClientError::Unauthorized { status: 403 })
        );
        assert_eq!(
            read_envelope(500, json!({"error": "db down"})),
            Err(ClientError::Api {
                status: 500,
                message: Some("db down".to_string())
            })
        );
    }

    #[test]
    fn test_error_message_prefers_error() {
        let body = json!({"error": "Unable to load dashboard", "details": "x", "message": "m"});
        assert_eq!(error_message(&body).as_deref(), Some("Unable to load dashboard"));
        assert_eq!(error_message(&json!({"message": "m"})).as_deref(), Some("m"));
        assert_eq!(error_message(&json!({"error": "", "message": "m"})).as_deref(), Some("m"));
        assert_eq!(error_message(&json!({"error": ""})), None);
    }

    #[test]
    fn test_auth_response() {
        let ok = AuthResponse::from_body(200, json!({"token": "abc"}));
        assert!(ok.is_success());
        assert_eq!(ok.token.as_deref(), Some("abc"));

        let rejected = AuthResponse::from_body(401, json!({"error": "Invalid credentials"}));
        assert!(!rejected.is_success());
        assert_eq!(rejected.reason(), Some("Invalid credentials"));

        let odd = AuthResponse::from_body(502, json!(["not", "an", "object"]));
        assert_eq!(odd.status, 502);
        assert!(odd.token.is_none());
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://api.example.org/", "/dashboard/"),
            "https://api.example.org/dashboard/"
        );
        assert_eq!(
            join_url("http://localhost:5000", "auth/login"),
            "http://localhost:5000/auth/login"
        );
    }
}
