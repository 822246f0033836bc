//! Client side: forms, page controllers and content rendering.
//!
//! ARCHITECTURE
//! ============
//! Controllers own their page state outright and talk to the server through
//! the [`api::ProxyApi`] trait, so they can be driven by the terminal
//! front-end or by tests with a scripted API.

pub mod api;
pub mod conversation;
pub mod form;
pub mod image;
pub mod render;

use form::FormError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    InvalidForm(#[from] FormError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("completion contained no reply")]
    EmptyReply,
}

/// Hook fired after every submission, success or failure, so externally
/// tracked usage/quota state can be re-read.
pub trait UsageRefresh: Send + Sync {
    fn refresh(&self);
}

impl<F> UsageRefresh for F
where
    F: Fn() + Send + Sync,
{
    fn refresh(&self) {
        self();
    }
}
