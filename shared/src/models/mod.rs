//! Data models
//!
//! Session-scoped models built from auth service payloads.

pub mod user;

// Re-exports
pub use user::*;
