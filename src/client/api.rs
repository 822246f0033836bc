//! HTTP client for the proxy endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns a `Result`; controllers branch on it instead of
//! unwinding. Non-2xx answers become [`ClientError::Status`] with the plain
//! text body the server sent.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ClientError;
use crate::llm::types::{ChatCompletion, ImageData, Message};
use crate::types::{ChatFeature, ChatRequest, Feature, ImageGenerationRequest};

/// Longer than the server's own provider timeout so the server answers first.
const REQUEST_TIMEOUT_SECS: u64 = 180;

/// The calls a page controller makes. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ProxyApi: Send + Sync {
    /// Send the full conversation to a chat-style endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    async fn chat(&self, feature: ChatFeature, messages: &[Message]) -> Result<ChatCompletion, ClientError>;

    /// Request a batch of images.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    async fn generate_images(&self, request: &ImageGenerationRequest) -> Result<Vec<ImageData>, ClientError>;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session_token: Option<String>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, session_token: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), session_token })
    }

    async fn post<B, T>(&self, feature: Feature, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let mut req = self
            .http
            .post(format!("{}{}", self.base_url, feature.path()))
            .json(body);
        if let Some(token) = &self.session_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), body: text });
        }
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ProxyApi for ApiClient {
    async fn chat(&self, feature: ChatFeature, messages: &[Message]) -> Result<ChatCompletion, ClientError> {
        self.post(feature.into(), &ChatRequest { messages }).await
    }

    async fn generate_images(&self, request: &ImageGenerationRequest) -> Result<Vec<ImageData>, ClientError> {
        self.post(Feature::Image, request).await
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
