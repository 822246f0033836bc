//! Genius: an authenticated proxy in front of OpenAI chat and image
//! generation, plus the client-side controllers that drive it.
//!
//! The server half is `routes` → `services` → `llm`; `client` only talks to
//! the server over HTTP.

pub mod client;
pub mod error;
pub mod llm;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;
