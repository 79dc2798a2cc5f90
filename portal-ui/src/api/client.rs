//! HTTP API Client
//!
//! [`PortalApi`] over `gloo-net`, following the same response rules as the
//! native client.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use localgov::client::{
    bearer, join_url, parse_body, read_envelope, AuthResponse, ClientError, ClientResult,
    LoginRequest, PortalApi, RegisterRequest, DASHBOARD_PATH, LOGIN_PATH, PROFILE_PATH,
    REGISTER_PATH,
};
use localgov::portal::{DashboardData, UserProfile};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// localStorage key that overrides the API base URL
const API_URL_KEY: &str = "localgov_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Council API from the browser
#[derive(Debug, Clone)]
pub struct GlooClient {
    base: String,
}

impl GlooClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Client for the configured API base
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base, path)
    }

    async fn read(response: Response) -> ClientResult<(u16, Value)> {
        let status = response.status();
        let content_type = response.headers().get("content-type");
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok((status, parse_body(content_type.as_deref(), &text)))
    }

    async fn post_auth<T: Serialize>(&self, path: &str, payload: &T) -> ClientResult<AuthResponse> {
        let request = Request::post(&self.url(path))
            .json(payload)
            .map_err(|e| ClientError::Request(e.to_string()))?;
        let response = request.send().await.map_err(unreachable_api)?;

        let (status, body) = Self::read(response).await?;
        Ok(AuthResponse::from_body(status, body))
    }

    async fn get_authorized<T: DeserializeOwned>(&self, path: &str, token: &str) -> ClientResult<T> {
        let request: RequestBuilder =
            Request::get(&self.url(path)).header("Authorization", &bearer(token));
        let response = request.send().await.map_err(unreachable_api)?;

        let (status, body) = Self::read(response).await?;
        let payload = read_envelope(status, body)?;
        Ok(serde_json::from_value(payload)?)
    }
}

/// A fetch that never got a response
fn unreachable_api(e: gloo_net::Error) -> ClientError {
    web_sys::console::warn_1(&format!("Request failed: {}", e).into());
    ClientError::Unavailable
}

#[async_trait(?Send)]
impl PortalApi for GlooClient {
    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        self.post_auth(LOGIN_PATH, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.post_auth(REGISTER_PATH, request).await
    }

    async fn profile(&self, token: &str) -> ClientResult<UserProfile> {
        self.get_authorized(PROFILE_PATH, token).await
    }

    async fn dashboard(&self, token: &str) -> ClientResult<DashboardData> {
        self.get_authorized(DASHBOARD_PATH, token).await
    }
}
