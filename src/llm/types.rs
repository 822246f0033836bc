//! LLM types: chat messages, provider responses and errors.
//!
//! Messages follow the `OpenAI` chat wire shape so they can be forwarded to
//! the provider without translation and rendered by the client unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Resolution;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl LlmError {
    /// Stable code attached to failure logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// CONTENT
// =============================================================================

/// One fragment of a structured message body.
///
/// Parts are classified by the field they carry, not by their `type` tag: a
/// string `text` wins, then a string `refusal`. Anything else is kept verbatim
/// as [`ContentPart::Unknown`] so it can still be forwarded to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ContentPart {
    Text { text: String },
    Refusal { refusal: String },
    Unknown(Value),
}

impl From<Value> for ContentPart {
    fn from(raw: Value) -> Self {
        let field = |name: &str| raw.get(name).and_then(Value::as_str).map(str::to_owned);
        if let Some(text) = field("text") {
            return Self::Text { text };
        }
        match field("refusal") {
            Some(refusal) => Self::Refusal { refusal },
            None => Self::Unknown(raw),
        }
    }
}

impl From<ContentPart> for Value {
    fn from(part: ContentPart) -> Self {
        match part {
            ContentPart::Text { text } => serde_json::json!({ "type": "text", "text": text }),
            ContentPart::Refusal { refusal } => serde_json::json!({ "type": "refusal", "refusal": refusal }),
            ContentPart::Unknown(raw) => raw,
        }
    }
}

/// Message content: either plain text or an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn in a conversation.
///
/// `content` is `None` only transiently, e.g. an assistant turn that carried
/// tool calls instead of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: Option<Content>,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<Content>) -> Self {
        Self { role, content: Some(content.into()) }
    }

    #[must_use]
    pub fn system(content: impl Into<Content>) -> Self {
        Self::new(Role::System, content)
    }

    #[must_use]
    pub fn user(content: impl Into<Content>) -> Self {
        Self::new(Role::User, content)
    }

    #[must_use]
    pub fn assistant(content: Option<Content>) -> Self {
        Self { role: Role::Assistant, content }
    }
}

// =============================================================================
// CHAT COMPLETION
// =============================================================================

/// Provider chat completion object.
///
/// Fields this crate does not read are kept in `extra` so the object can be
/// returned to callers as the provider produced it. Choice messages are
/// normalized to `{ role, content }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Token accounting. Provider detail objects (`prompt_tokens_details`, ...)
/// ride along in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatCompletion {
    /// Message of the first choice, if the provider returned any.
    #[must_use]
    pub fn reply(&self) -> Option<&Message> {
        self.choices.first().map(|c| &c.message)
    }

    /// Consume the completion, keeping only the first choice's message.
    #[must_use]
    pub fn into_reply(self) -> Option<Message> {
        self.choices.into_iter().next().map(|c| c.message)
    }
}

// =============================================================================
// IMAGES
// =============================================================================

/// Image generation call, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub n: u8,
    pub size: Resolution,
}

/// One generated image as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// PROVIDER TRAIT
// =============================================================================

/// Provider-neutral async trait for the AI calls the proxy makes. Enables
/// mocking in tests.
///
/// Models are fixed by the implementation; callers never choose them.
#[async_trait::async_trait]
pub trait AiProvider: Send + Sync {
    /// Run a chat completion over `messages`.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is malformed.
    async fn chat_completion(&self, messages: &[Message]) -> Result<ChatCompletion, LlmError>;

    /// Generate images for a validated request.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is malformed.
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<ImageData>, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
