//! Auth plumbing: resolves the caller before any proxy work happens.

use axum::extract::FromRef;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::error::ApiError;
use crate::state::AppState;

/// Session cookie set by the identity provider's front-end SDK.
pub const SESSION_COOKIE_NAME: &str = "__session";

/// Pull the caller's token from `Authorization: Bearer` or the session cookie.
pub(crate) fn session_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_owned());
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(SESSION_COOKIE_NAME)
        .map(Cookie::value)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated caller. Use as a handler parameter to require authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(ApiError::Unauthorized)?;

        let app_state = AppState::from_ref(state);
        let identity = app_state
            .identity
            .resolve(&token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "identity lookup failed");
                ApiError::Internal
            })?
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self { user_id: identity.user_id })
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
