//! LLM: provider adapter for the proxied AI features.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables. `LlmClient` pins the chat
//! and image models server-side and implements [`AiProvider`], which is what
//! route handlers depend on.

pub mod config;
pub mod openai;
pub mod types;

use config::LlmConfig;
pub use types::AiProvider;
use types::{ChatCompletion, ImageData, ImageRequest, LlmError, Message};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete provider client, configured by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: openai::OpenAiClient,
    chat_model: String,
    image_model: String,
}

impl LlmClient {
    /// Build a provider client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build a provider client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = openai::OpenAiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, chat_model: config.chat_model, image_model: config.image_model })
    }

    #[must_use]
    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    #[must_use]
    pub fn image_model(&self) -> &str {
        &self.image_model
    }
}

#[async_trait::async_trait]
impl AiProvider for LlmClient {
    async fn chat_completion(&self, messages: &[Message]) -> Result<ChatCompletion, LlmError> {
        self.inner
            .chat_completions(&self.chat_model, messages)
            .await
    }

    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<ImageData>, LlmError> {
        self.inner
            .images_generations(&self.image_model, request)
            .await
    }
}
