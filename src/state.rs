//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! read-only after startup: handlers never share mutable state, so concurrent
//! requests cannot interact.

use std::sync::Arc;

use crate::llm::AiProvider;
use crate::services::identity::IdentityProvider;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Provider client. `None` if the API key is not configured.
    pub provider: Option<Arc<dyn AiProvider>>,
    /// Resolves session tokens to callers.
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Option<Arc<dyn AiProvider>>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { provider, identity }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
