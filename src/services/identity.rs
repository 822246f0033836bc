//! Caller identity: resolves a session token to an opaque user id.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sign-in and session management live with an external identity provider.
//! This service only asks it "who owns this token?". Two backends exist:
//! a remote verification endpoint, and a static token table for local
//! development and tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

const VERIFY_TIMEOUT_SECS: u64 = 10;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity request failed: {0}")]
    Request(String),
    #[error("identity response error: status {status}")]
    Response { status: u16 },
    #[error("identity response parse failed: {0}")]
    Parse(String),
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Token → identity lookup. `Ok(None)` means the token is not recognised.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`IdentityError`] when the backend cannot answer.
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError>;
}

// =============================================================================
// STATIC TABLE
// =============================================================================

/// Fixed token table, parsed from `token:user_id` pairs.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    tokens: HashMap<String, String>,
}

impl StaticIdentity {
    /// Parse a comma-separated `token:user_id` list. Malformed entries are skipped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split(',')
            .filter_map(|pair| {
                let (token, user) = pair.split_once(':')?;
                let (token, user) = (token.trim(), user.trim());
                if token.is_empty() || user.is_empty() {
                    return None;
                }
                Some((token.to_owned(), user.to_owned()))
            })
            .collect();
        Self { tokens }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for StaticIdentity {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .tokens
            .get(token)
            .map(|user_id| Identity { user_id: user_id.clone() }))
    }
}

// =============================================================================
// REMOTE VERIFICATION
// =============================================================================

/// Verifies tokens by calling `GET <verify_url>` with the token as a bearer
/// credential. A 2xx answer must carry `{ "user_id": "..." }`.
pub struct RemoteIdentity {
    http: reqwest::Client,
    verify_url: String,
}

#[derive(Deserialize)]
struct VerifyResponse {
    user_id: Option<String>,
}

impl RemoteIdentity {
    /// # Errors
    ///
    /// Returns [`IdentityError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(verify_url: String) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(VERIFY_TIMEOUT_SECS))
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, verify_url })
    }
}

#[async_trait::async_trait]
impl IdentityProvider for RemoteIdentity {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        let resp = self
            .http
            .get(&self.verify_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = resp.status();
        if matches!(status.as_u16(), 401 | 403 | 404) {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(IdentityError::Response { status: status.as_u16() });
        }

        let body: VerifyResponse = resp
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))?;
        Ok(body
            .user_id
            .filter(|id| !id.is_empty())
            .map(|user_id| Identity { user_id }))
    }
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// Pick the identity backend from environment variables.
///
/// - `IDENTITY_VERIFY_URL` selects [`RemoteIdentity`].
/// - otherwise `IDENTITY_STATIC_TOKENS` selects [`StaticIdentity`].
/// - with neither set every request is unauthenticated.
///
/// # Errors
///
/// Returns an error if the remote backend's HTTP client cannot be built.
pub fn from_env() -> Result<Arc<dyn IdentityProvider>, IdentityError> {
    if let Some(url) = std::env::var("IDENTITY_VERIFY_URL").ok().filter(|u| !u.is_empty()) {
        tracing::info!(%url, "identity: remote verification");
        return Ok(Arc::new(RemoteIdentity::new(url)?));
    }

    let table = StaticIdentity::parse(&std::env::var("IDENTITY_STATIC_TOKENS").unwrap_or_default());
    if table.is_empty() {
        tracing::warn!("identity provider not configured: all proxy requests will be rejected");
    } else {
        tracing::info!(tokens = table.len(), "identity: static token table");
    }
    Ok(Arc::new(table))
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
