//! staff-server: employee registry HTTP API
//!
//! ```text
//! api (axum handlers, auth, request id, timeout)
//!   └─ service (one transaction per use case)
//!        └─ db (transaction-scoped store: PostgreSQL or in-memory)
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod state;

// Re-exports
pub use config::Config;
pub use db::{EmployeeStore, EmployeeTx, MemoryStore, PgStore, StoreError, StoreResult};
pub use service::{EmployeeService, StaffService};
pub use state::AppState;
