//! Shared types for the staff registry
//!
//! Data model and the unified error/response types used by the server and
//! by anything that talks to its HTTP API.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use models::{Employee, EmployeeCreate, Gender};
