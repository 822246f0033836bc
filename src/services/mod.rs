//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and provider/identity concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod identity;
pub mod proxy;
