use super::*;
use crate::services::identity::{Identity, IdentityError, IdentityProvider};
use crate::state::test_helpers::{TEST_TOKEN, TEST_USER, test_app_state};
use axum::extract::FromRequestParts;
use axum::http::Request;
use std::sync::Arc;

fn parts_with(header: Option<(&str, &str)>) -> Parts {
    let mut builder = Request::builder().uri("/api/conversation");
    if let Some((name, value)) = header {
        builder = builder.header(name, value);
    }
    builder.body(()).unwrap().into_parts().0
}

// =============================================================================
// session_token
// =============================================================================

#[test]
fn token_from_bearer_header() {
    let parts = parts_with(Some(("authorization", "Bearer abc")));
    assert_eq!(session_token(&parts).as_deref(), Some("abc"));
}

#[test]
fn token_from_session_cookie() {
    let parts = parts_with(Some(("cookie", "theme=dark; __session=xyz")));
    assert_eq!(session_token(&parts).as_deref(), Some("xyz"));
}

#[test]
fn non_bearer_scheme_is_ignored() {
    let parts = parts_with(Some(("authorization", "Basic dXNlcjpwdw==")));
    assert_eq!(session_token(&parts), None);
}

#[test]
fn empty_bearer_is_ignored() {
    let parts = parts_with(Some(("authorization", "Bearer   ")));
    assert_eq!(session_token(&parts), None);
}

#[test]
fn no_credentials() {
    assert_eq!(session_token(&parts_with(None)), None);
}

// =============================================================================
// AuthUser extractor
// =============================================================================

#[tokio::test]
async fn extractor_resolves_known_token() {
    let state = test_app_state(None);
    let mut parts = parts_with(Some(("authorization", &format!("Bearer {TEST_TOKEN}"))));
    let user = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
    assert_eq!(user.user_id, TEST_USER);
}

#[tokio::test]
async fn extractor_rejects_unknown_token() {
    let state = test_app_state(None);
    let mut parts = parts_with(Some(("authorization", "Bearer stranger")));
    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn extractor_rejects_missing_token() {
    let state = test_app_state(None);
    let mut parts = parts_with(None);
    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

struct BrokenIdentity;

#[async_trait::async_trait]
impl IdentityProvider for BrokenIdentity {
    async fn resolve(&self, _token: &str) -> Result<Option<Identity>, IdentityError> {
        Err(IdentityError::Request("connection refused".into()))
    }
}

#[tokio::test]
async fn extractor_maps_backend_failure_to_internal() {
    let state = AppState::new(None, Arc::new(BrokenIdentity));
    let mut parts = parts_with(Some(("authorization", "Bearer anything")));
    let err = AuthUser::from_request_parts(&mut parts, &state).await.unwrap_err();
    assert!(matches!(err, ApiError::Internal));
}
