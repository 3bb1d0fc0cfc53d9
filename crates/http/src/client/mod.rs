//! Auth backend HTTP client

pub mod error;
pub mod session;

use error::ClientError;
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;

/// Path of the "get current session" endpoint on the auth backend
pub const DEFAULT_SESSION_PATH: &str = "/api/auth/get-session";

/// Auth backend client
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    session_path: String,
    bearer_token: Option<String>,
    cookie: Option<String>,
}

impl AuthClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> AuthClientBuilder {
        AuthClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the session endpoint path
    pub fn session_path(&self) -> &str {
        &self.session_path
    }

    /// Create a request builder with the configured credentials
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = &self.bearer_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        request
    }

    /// Send a request and return the body of a successful response
    pub async fn execute_text(&self, request: reqwest::RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for AuthClient
#[derive(Default)]
pub struct AuthClientBuilder {
    base_url: Option<String>,
    session_path: Option<String>,
    bearer_token: Option<String>,
    cookie: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AuthClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the session endpoint path
    pub fn session_path(mut self, path: impl Into<String>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Send a raw `Cookie` header with every request (ignored by browsers)
    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AuthClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let session_path = self
            .session_path
            .unwrap_or_else(|| DEFAULT_SESSION_PATH.to_string());
        if !session_path.starts_with('/') {
            return Err(ClientError::Configuration(format!(
                "session_path must start with '/': {session_path}"
            )));
        }

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")));
        }

        let client = client_builder.build()?;

        Ok(AuthClient {
            client,
            base_url,
            session_path,
            bearer_token: self.bearer_token,
            cookie: self.cookie,
        })
    }
}
