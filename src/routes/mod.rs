//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the three proxy endpoints plus a health probe under a single Axum
//! router. Proxy paths accept `POST` only; other methods get the router's 405.

pub mod auth;
pub mod proxy;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::types::Feature;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(Feature::Conversation.path(), post(proxy::conversation))
        .route(Feature::Code.path(), post(proxy::code))
        .route(Feature::Image.path(), post(proxy::image))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
