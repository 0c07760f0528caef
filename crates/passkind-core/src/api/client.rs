//! HTTP client for the PassKind backend.
//!
//! Everything of consequence happens server-side; this client moves JSON
//! over HTTP with a bearer token attached. 401/403 responses surface as
//! [`ApiError::Unauthorized`] so the caller can clear the session and
//! send the user back to login.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::models::{
    AuthRequest, AuthResponse, HistoryEvent, RegisterRequest, ResendOtpRequest, Secret,
    SecretInput, VerifyEmailRequest,
};
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://host:8080/api`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        // Parse up front so a bad config fails here, not on first request.
        Url::parse(base_url)?;
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Log in, returning the bearer token to persist.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = AuthRequest {
            email: email.into(),
            password: password.into(),
        };
        let resp: AuthResponse = self.json(Method::POST, "/auth/login", Some(&body)).await?;
        Ok(resp.access_token)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> Result<(), ApiError> {
        let body = RegisterRequest {
            email: email.into(),
            password: password.into(),
            username: username.map(Into::into),
        };
        self.no_content(Method::POST, "/auth/register", Some(&body))
            .await
    }

    pub async fn verify_email(&self, email: &str, otp_code: &str) -> Result<(), ApiError> {
        let body = VerifyEmailRequest {
            email: email.into(),
            otp_code: otp_code.into(),
        };
        self.no_content(Method::POST, "/auth/verify-email", Some(&body))
            .await
    }

    pub async fn resend_otp(&self, email: &str) -> Result<(), ApiError> {
        let body = ResendOtpRequest {
            email: email.into(),
        };
        self.no_content(Method::POST, "/auth/resend-otp", Some(&body))
            .await
    }

    // ── Secrets ──────────────────────────────────────────────────────

    pub async fn list_secrets(&self) -> Result<Vec<Secret>, ApiError> {
        self.json(Method::GET, "/secrets", None::<&()>).await
    }

    pub async fn get_secret(&self, id: i64) -> Result<Secret, ApiError> {
        self.json(Method::GET, &format!("/secrets/{id}"), None::<&()>)
            .await
    }

    /// Fetch the decrypted value. The backend returns it as a plain body.
    pub async fn secret_value(&self, id: i64) -> Result<String, ApiError> {
        let resp = self
            .request(Method::GET, &format!("/secrets/{id}/value"), None::<&()>)
            .await?;
        Ok(resp.text().await?)
    }

    pub async fn create_secret(&self, input: &SecretInput) -> Result<Secret, ApiError> {
        self.json(Method::POST, "/secrets", Some(input)).await
    }

    pub async fn update_secret(&self, id: i64, input: &SecretInput) -> Result<Secret, ApiError> {
        self.json(Method::PUT, &format!("/secrets/{id}"), Some(input))
            .await
    }

    pub async fn delete_secret(&self, id: i64) -> Result<(), ApiError> {
        self.no_content(Method::DELETE, &format!("/secrets/{id}"), None::<&()>)
            .await
    }

    pub async fn secret_history(&self, id: i64) -> Result<Vec<HistoryEvent>, ApiError> {
        self.json(Method::GET, &format!("/secrets/{id}/history"), None::<&()>)
            .await
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut req = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        match resp.status() {
            status if status.is_success() => Ok(resp),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            status => Err(ApiError::Status {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        Ok(self.request(method, path, body).await?.json().await?)
    }

    async fn no_content<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.request(method, path, body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_returns_access_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/login")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "email": "a@b.c"
            })))
            .with_body(r#"{"accessToken": "tok-1", "tokenType": "Bearer"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let token = client.login("a@b.c", "pw").await.unwrap();
        assert_eq!(token, "tok-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_secrets_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/secrets")
            .match_header("authorization", "Bearer tok-2")
            .with_body(r#"[{"id": 1, "name": "github"}]"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("tok-2");
        let secrets = client.list_secrets().await.unwrap();
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].name, "github");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_dedicated_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/secrets")
            .with_status(401)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("stale");
        assert!(matches!(
            client.list_secrets().await,
            Err(ApiError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/secrets/9")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("tok");
        match client.delete_secret(9).await {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn secret_value_returns_plain_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/secrets/3/value")
            .with_body("hunter2")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("tok");
        assert_eq!(client.secret_value(3).await.unwrap(), "hunter2");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
