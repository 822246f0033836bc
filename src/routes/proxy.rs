//! Proxy routes: `POST /api/conversation`, `/api/code`, `/api/image`.
//!
//! Each handler runs the same ladder: authenticate (extractor), check the
//! provider is configured, validate the body, forward, return the provider
//! payload. Provider failures are logged with the feature's marker and
//! surface as a bare 500.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::llm::AiProvider;
use crate::llm::types::{ChatCompletion, ImageData};
use crate::services::proxy::{self, ProxyError};
use crate::state::AppState;
use crate::types::{ChatFeature, Feature};

/// `POST /api/conversation`: general chat completion.
pub async fn conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> Result<Json<ChatCompletion>, ApiError> {
    chat(&state, &auth, ChatFeature::Conversation, &body).await
}

/// `POST /api/code`: chat completion behind the code-assistant instruction.
pub async fn code(State(state): State<AppState>, auth: AuthUser, body: Bytes) -> Result<Json<ChatCompletion>, ApiError> {
    chat(&state, &auth, ChatFeature::Code, &body).await
}

/// `POST /api/image`: image generation; returns the provider's `data` list.
pub async fn image(State(state): State<AppState>, auth: AuthUser, body: Bytes) -> Result<Json<Vec<ImageData>>, ApiError> {
    let provider = configured_provider(&state, Feature::Image)?;
    tracing::debug!(user_id = %auth.user_id, feature = Feature::Image.name(), "proxy request");

    proxy::forward_image(provider.as_ref(), &body)
        .await
        .map(Json)
        .map_err(|e| proxy_error_to_api(Feature::Image, e))
}

async fn chat(
    state: &AppState,
    auth: &AuthUser,
    feature: ChatFeature,
    body: &[u8],
) -> Result<Json<ChatCompletion>, ApiError> {
    let provider = configured_provider(state, feature.into())?;
    tracing::debug!(user_id = %auth.user_id, feature = Feature::from(feature).name(), "proxy request");

    proxy::forward_chat(provider.as_ref(), feature, body)
        .await
        .map(Json)
        .map_err(|e| proxy_error_to_api(feature.into(), e))
}

fn configured_provider(state: &AppState, feature: Feature) -> Result<Arc<dyn AiProvider>, ApiError> {
    state.provider.clone().ok_or_else(|| {
        tracing::error!(feature = feature.name(), "provider API key not configured");
        ApiError::Misconfigured
    })
}

/// Map service errors onto the HTTP taxonomy, logging provider failures.
pub(crate) fn proxy_error_to_api(feature: Feature, err: ProxyError) -> ApiError {
    match err {
        ProxyError::InvalidJson(_)
        | ProxyError::MessagesRequired
        | ProxyError::MissingField(_)
        | ProxyError::InvalidField { .. } => {
            tracing::info!(feature = feature.name(), error = %err, "rejected proxy payload");
            ApiError::BadRequest(err.to_string())
        }
        ProxyError::Provider(e) => {
            tracing::error!(code = e.error_code(), error = %e, "[{}]", feature.error_marker());
            ApiError::Internal
        }
    }
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
