use async_trait::async_trait;
use gamedeck_core::config::ClientConfig;
use gamedeck_core::{DeleteAck, ErrorPayload, Product, ProductDraft, ProductId};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// The five catalog operations as seen from the client.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ApiError>;
    async fn get(&self, id: ProductId) -> Result<Product, ApiError>;
    async fn create(&self, draft: &ProductDraft) -> Result<Product, ApiError>;
    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, ApiError>;
    async fn delete(&self, id: ProductId) -> Result<(), ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl HttpCatalogApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client: Client::new(), base_url, api_token: None }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let api = Self::new(config.base_url.clone());
        match &config.api_token {
            Some(token) => api.with_token(token.clone()),
            None => api,
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{path}", self.base_url));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response =
            builder.send().await.map_err(|error| ApiError::Transport(error.to_string()))?;
        let status = response.status();
        debug!(
            event_name = "catalog.client.response",
            status = status.as_u16(),
            "catalog response"
        );

        if status.is_success() {
            return response.json::<T>().await.map_err(|error| ApiError::Decode(error.to_string()));
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorPayload>(&raw)
            .map(|payload| payload.text().to_string())
            .unwrap_or(raw);

        if status == StatusCode::NOT_FOUND {
            Err(ApiError::NotFound(message))
        } else {
            Err(ApiError::Status { status: status.as_u16(), message })
        }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.send(self.request(Method::GET, "/products")).await
    }

    async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        self.send(self.request(Method::GET, &format!("/products/{id}"))).await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        self.send(self.request(Method::POST, "/products").json(draft)).await
    }

    async fn update(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, ApiError> {
        self.send(self.request(Method::PUT, &format!("/products/{id}")).json(draft)).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &format!("/products/{id}"));
        let ack: DeleteAck = self.send(request).await?;
        if ack.ok {
            Ok(())
        } else {
            Err(ApiError::Decode("delete was not acknowledged".to_string()))
        }
    }
}
