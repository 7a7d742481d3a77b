//! HTTP client for the planet API.
//!
//! Configuration is via environment variables:
//! - `PLANET_API_URL` - Server base URL (default: `http://127.0.0.1:8080`)

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

use crate::api::problem::Problem;
use crate::models::{PlanetRequest, PlanetResponse, SuccessResponse};

/// Default URL for a locally running server.
const DEFAULT_URL: &str = "http://127.0.0.1:8080";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct PlanetClient {
    base_url: String,
    client: Client,
}

impl PlanetClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("PLANET_API_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/api/planets{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Turn a non-success response into a `ClientError`, preferring the
    /// problem document's `detail` when the body carries one.
    async fn error_for(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return ClientError::Http(e),
        };
        let detail = serde_json::from_str::<Problem>(&body)
            .map(|p| p.detail)
            .unwrap_or(body);

        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(detail),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(detail),
            _ => ClientError::Server(format!("{}: {}", status, detail)),
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if response.status().is_success() {
            let envelope: SuccessResponse<T> = response.json().await?;
            Ok(envelope.data)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    pub async fn list(&self) -> Result<Vec<PlanetResponse>, ClientError> {
        let response = self.request(Method::GET, "").send().await?;
        Self::handle_response(response).await
    }

    pub async fn get(&self, id: Uuid) -> Result<PlanetResponse, ClientError> {
        let response = self
            .request(Method::GET, &format!("/{}", id))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Case-insensitive lookup by name.
    pub async fn search(&self, name: &str) -> Result<PlanetResponse, ClientError> {
        let response = self
            .request(Method::GET, "/search")
            .query(&[("name", name)])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn create(&self, input: &PlanetRequest) -> Result<PlanetResponse, ClientError> {
        let response = self.request(Method::POST, "").json(input).send().await?;
        Self::handle_response(response).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &PlanetRequest,
    ) -> Result<PlanetResponse, ClientError> {
        let response = self
            .request(Method::PUT, &format!("/{}", id))
            .json(input)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/{}", id))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }
}
