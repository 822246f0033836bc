//! OpenAI-compatible API client.
//!
//! Speaks `/chat/completions` and `/images/generations`. Any base URL that
//! implements those two endpoints works.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatCompletion, ImageData, ImageRequest, LlmError, Message};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-200 status, or an
    /// undecodable completion body.
    pub async fn chat_completions(&self, model: &str, messages: &[Message]) -> Result<ChatCompletion, LlmError> {
        let body = CcRequest { model, messages };
        let text = self.send_json("/chat/completions", &body).await?;
        parse_chat_completions_response(&text)
    }

    /// # Errors
    ///
    /// Returns an error on transport failure, non-200 status, or an
    /// undecodable image body.
    pub async fn images_generations(&self, model: &str, request: &ImageRequest) -> Result<Vec<ImageData>, LlmError> {
        let body = ImgRequest { model, prompt: &request.prompt, n: request.n, size: request.size.as_str() };
        let text = self.send_json("/images/generations", &body).await?;
        parse_images_response(&text)
    }

    async fn send_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

// =============================================================================
// CHAT COMPLETIONS: wire types
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

fn parse_chat_completions_response(text: &str) -> Result<ChatCompletion, LlmError> {
    serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))
}

// =============================================================================
// IMAGES: wire types
// =============================================================================

#[derive(Serialize)]
struct ImgRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImgResponse {
    data: Vec<ImageData>,
}

fn parse_images_response(text: &str) -> Result<Vec<ImageData>, LlmError> {
    let parsed: ImgResponse = serde_json::from_str(text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    Ok(parsed.data)
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
