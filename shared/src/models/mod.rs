//! Data models
//!
//! Shared between the server and API clients. All IDs are v4 `Uuid`s
//! assigned by the server.

pub mod employee;

// Re-exports
pub use employee::*;
