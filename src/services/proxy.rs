//! Proxy service: payload validation and the provider forward.
//!
//! DESIGN
//! ======
//! Bodies are parsed from raw bytes so validation runs only after the route
//! has authenticated the caller and confirmed the provider is configured.
//! Image fields are checked one at a time in `prompt`, `amount`,
//! `resolution` order and the first failure wins.

use serde_json::Value;

use crate::llm::types::{AiProvider, ChatCompletion, ImageData, ImageRequest, LlmError, Message};
use crate::types::{Amount, ChatFeature, Resolution, UnknownOption};

/// System instruction placed ahead of every code-feature conversation.
pub const CODE_INSTRUCTION: &str = "You are a helpful AI assistant specialized in generating code. - If the user asks for a code-related question, provide a markdown-formatted code snippet. - If the user asks a general question, respond with a clear and concise text answer.";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),
    #[error("Messages are required")]
    MessagesRequired,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error(transparent)]
    Provider(#[from] LlmError),
}

impl From<UnknownOption> for ProxyError {
    fn from(err: UnknownOption) -> Self {
        Self::InvalidField { field: err.field, reason: err.to_string() }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

fn parse_body(body: &[u8]) -> Result<Value, ProxyError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ProxyError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(ProxyError::InvalidJson("expected a JSON object".into()));
    }
    Ok(value)
}

/// Parse `{ messages: [...] }`. The list must be present and non-empty.
///
/// # Errors
///
/// Returns a validation error for malformed JSON, a missing or empty list, or
/// entries that are not messages.
pub fn parse_chat_payload(body: &[u8]) -> Result<Vec<Message>, ProxyError> {
    let mut value = parse_body(body)?;
    let raw = match value.get_mut("messages").map(Value::take) {
        None | Some(Value::Null) => return Err(ProxyError::MessagesRequired),
        Some(raw) => raw,
    };
    let messages: Vec<Message> = serde_json::from_value(raw)
        .map_err(|e| ProxyError::InvalidField { field: "messages", reason: e.to_string() })?;
    if messages.is_empty() {
        return Err(ProxyError::MessagesRequired);
    }
    Ok(messages)
}

/// Read a required scalar field as text. Numbers are accepted for `amount`
/// style fields; empty strings count as missing.
fn required_text(value: &Value, field: &'static str) -> Result<String, ProxyError> {
    let text = match value.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_owned()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => {
            return Err(ProxyError::InvalidField { field, reason: "expected a string".into() });
        }
    };
    text.filter(|t| !t.is_empty())
        .ok_or(ProxyError::MissingField(field))
}

/// Parse `{ prompt, amount, resolution }` into a provider image request.
///
/// # Errors
///
/// Returns the first missing or invalid field in `prompt`, `amount`,
/// `resolution` order.
pub fn parse_image_payload(body: &[u8]) -> Result<ImageRequest, ProxyError> {
    let value = parse_body(body)?;

    let prompt = required_text(&value, "prompt")?;
    let amount: Amount = required_text(&value, "amount")?.parse()?;
    let resolution: Resolution = required_text(&value, "resolution")?.parse()?;

    Ok(ImageRequest { prompt, n: amount.count(), size: resolution })
}

/// Messages actually sent upstream for a chat-style feature.
#[must_use]
pub fn outbound_messages(feature: ChatFeature, messages: Vec<Message>) -> Vec<Message> {
    match feature {
        ChatFeature::Conversation => messages,
        ChatFeature::Code => {
            let mut out = Vec::with_capacity(messages.len() + 1);
            out.push(Message::system(CODE_INSTRUCTION));
            out.extend(messages);
            out
        }
    }
}

// =============================================================================
// FORWARDING
// =============================================================================

/// Validate a chat body and forward it. Returns the provider's completion.
///
/// # Errors
///
/// Returns a validation error or the provider failure.
pub async fn forward_chat(
    provider: &dyn AiProvider,
    feature: ChatFeature,
    body: &[u8],
) -> Result<ChatCompletion, ProxyError> {
    let messages = outbound_messages(feature, parse_chat_payload(body)?);
    Ok(provider.chat_completion(&messages).await?)
}

/// Validate an image body and forward it. Returns the provider's image list.
///
/// # Errors
///
/// Returns a validation error or the provider failure.
pub async fn forward_image(provider: &dyn AiProvider, body: &[u8]) -> Result<Vec<ImageData>, ProxyError> {
    let request = parse_image_payload(body)?;
    Ok(provider.generate_images(&request).await?)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
