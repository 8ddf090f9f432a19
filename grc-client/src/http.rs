//! HTTP client for the authentication service

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{LoginRequest, LoginResponse, UserInfo};

use crate::auth::AuthService;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making requests to the auth service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(t) => request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", t)),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T> {
        let request = Self::authorize(self.client.get(self.url(path)), token);
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let request = Self::authorize(self.client.post(self.url(path)).json(body), token);
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body, ignoring any response body
    pub async fn post_empty(&self, path: &str, token: Option<&str>) -> ClientResult<()> {
        let request = Self::authorize(self.client.post(self.url(path)), token);
        let response = request.send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
            _ => Err(ClientError::Internal(format!("{}: {}", status, text))),
        }
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AuthService for HttpClient {
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/login", &request, None).await
    }

    async fn logout(&self, access_token: &str) -> ClientResult<()> {
        self.post_empty("/api/auth/logout", Some(access_token)).await
    }

    async fn current_user(&self, access_token: &str) -> ClientResult<UserInfo> {
        self.get("/api/auth/me", Some(access_token)).await
    }
}
