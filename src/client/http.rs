//! reqwest implementation of [`PortalApi`]

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::{
    bearer, join_url, parse_body, read_envelope, AuthResponse, ClientError, ClientResult,
    LoginRequest, PortalApi, RegisterRequest, DASHBOARD_PATH, LOGIN_PATH, PROFILE_PATH,
    REGISTER_PATH, REQUEST_ID_HEADER,
};
use crate::portal::{DashboardData, UserProfile};

/// Connection settings for [`HttpClient`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the council API (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Council API over HTTP
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(config.base_url));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    /// Send, tag with a request id, and return the status and parsed body
    async fn send(&self, request: RequestBuilder, method: &str, path: &str) -> ClientResult<(u16, Value)> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(request_id = %request_id, method, path, "Sending request");

        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                let err = ClientError::from(e);
                tracing::warn!(request_id = %request_id, path, error = %err, "Request failed");
                err
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;
        let body = parse_body(content_type.as_deref(), &text);

        tracing::info!(request_id = %request_id, method, path, status, "Response received");
        Ok((status, body))
    }

    async fn post_auth<T: serde::Serialize>(&self, path: &str, payload: &T) -> ClientResult<AuthResponse> {
        let request = self.client.post(self.url(path)).json(payload);
        let (status, body) = self.send(request, "POST", path).await?;
        Ok(AuthResponse::from_body(status, body))
    }

    async fn get_authorized<T: DeserializeOwned>(&self, path: &str, token: &str) -> ClientResult<T> {
        let request = self
            .client
            .get(self.url(path))
            .header(AUTHORIZATION, bearer(token));
        let (status, body) = self.send(request, "GET", path).await?;

        let payload = read_envelope(status, body).map_err(|e| {
            tracing::warn!(path, status, error = %e, "API returned an error");
            e
        })?;
        Ok(serde_json::from_value(payload)?)
    }
}

#[async_trait(?Send)]
impl PortalApi for HttpClient {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::Category;
    use axum::extract::Json;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::Router;
    use serde_json::json;

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    async fn login(Json(body): Json<Value>) -> Response {
        if body["password"] == "secret" {
            Json(json!({"token": "good", "message": "Login successful"})).into_response()
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid credentials"})),
            )
                .into_response()
        }
    }

    async fn register(Json(body): Json<Value>) -> Response {
        if body["email"] == "taken@example.org" {
            (
                StatusCode::CONFLICT,
                Json(json!({"error": "Email already registered"})),
            )
                .into_response()
        } else {
            (StatusCode::CREATED, Json(json!({"message": "Registered"}))).into_response()
        }
    }

    async fn profile(headers: HeaderMap) -> Response {
        if header(&headers, REQUEST_ID_HEADER).is_none() {
            return StatusCode::BAD_REQUEST.into_response();
        }
        match header(&headers, "authorization") {
            Some("Bearer good") => Json(json!({
                "id": 1,
                "name": "Jo Citizen",
                "email": "jo@example.org",
                "council_name": "Riverside Council"
            }))
            .into_response(),
            Some("Bearer broken") => {
                (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
            }
            _ => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Token has expired"})),
            )
                .into_response(),
        }
    }

    async fn dashboard(headers: HeaderMap) -> Response {
        match header(&headers, "authorization") {
            Some("Bearer good") => Json(json!({
                "Rates": [{"id": 1, "address": "12 River Rd"}],
                "Community": ["Hall booking"]
            }))
            .into_response(),
            _ => (StatusCode::FORBIDDEN, Json(json!({}))).into_response(),
        }
    }

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/user/profile", get(profile))
            .route("/dashboard/", get(dashboard));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String) -> HttpClient {
        HttpClient::new(ClientConfig {
            base_url,
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = HttpClient::new(ClientConfig {
            base_url: "ftp://example.org".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_login_success_and_rejection() {
        let api = client(spawn_stub().await);

        let ok = api
            .login(&LoginRequest {
                email: "jo@example.org".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(ok.status, 200);
        assert_eq!(ok.token.as_deref(), Some("good"));

        // A rejected login is data, not an error
        let rejected = api
            .login(&LoginRequest {
                email: "jo@example.org".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(rejected.status, 401);
        assert!(rejected.token.is_none());
        assert_eq!(rejected.reason(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let api = client(spawn_stub().await);
        let reply = api
            .register(&RegisterRequest {
                name: "Jo".to_string(),
                email: "taken@example.org".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(reply.status, 409);
        assert_eq!(reply.reason(), Some("Email already registered"));
    }

    #[tokio::test]
    async fn test_profile_and_dashboard() {
        let api = client(spawn_stub().await);

        let profile = api.profile("good").await.unwrap();
        assert_eq!(profile.name.as_deref(), Some("Jo Citizen"));
        assert_eq!(profile.council_name.as_deref(), Some("Riverside Council"));
        assert!(profile.council_logo_url.is_none());

        let data = api.dashboard("good").await.unwrap();
        assert_eq!(data.items(Category::Rates).len(), 1);
        assert_eq!(data.items(Category::Community).len(), 1);
        assert!(data.items(Category::Water).is_empty());
    }

    #[tokio::test]
    async fn test_auth_failures() {
        let api = client(spawn_stub().await);
        assert_eq!(
            api.profile("stale").await.unwrap_err(),
            ClientError::Unauthorized { status: 401 }
        );
        assert_eq!(
            api.dashboard("stale").await.unwrap_err(),
            ClientError::Unauthorized { status: 403 }
        );
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let api = client(spawn_stub().await);
        assert_eq!(
            api.profile("broken").await.unwrap_err(),
            ClientError::Api {
                status: 500,
                message: None
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client(format!("http://{}", addr));
        assert_eq!(api.profile("good").await.unwrap_err(), ClientError::Unavailable);
    }
}
