//! Record store
//!
//! Every read and write against the `employee` table goes through an
//! [`EmployeeTx`] opened by an [`EmployeeStore`]. A transaction that is
//! dropped without [`EmployeeTx::commit`] is rolled back, and `commit`
//! consumes the handle, so a rollback can never follow a commit.
//!
//! - [`PgStore`]: PostgreSQL, used by the server
//! - [`MemoryStore`]: in-process fake with the same semantics, used by tests

pub mod memory;
pub mod postgres;

pub use memory::{MemoryStore, MemoryTx};
pub use postgres::{PgStore, PgTx};

use async_trait::async_trait;
use shared::models::{Employee, EmployeeCreate};
use thiserror::Error;
use uuid::Uuid;

/// Storage-layer error
///
/// Propagated untouched through the service layer; the transport exposes
/// its `Display` text to the client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver error: connection, constraint violation, cancelled query...
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    /// No active employee with this id
    #[error("employee {0} not found")]
    NotFound(Uuid),
    /// Primary key violation in the in-memory store
    #[error("employee {0} already exists")]
    Duplicate(Uuid),
    /// A value does not fit its column (or a stored value does not fit the model)
    #[error("value {value} out of range for column {column}")]
    OutOfRange { column: &'static str, value: i64 },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Opens transactions against the employee table
#[async_trait]
pub trait EmployeeStore: Send + Sync + 'static {
    type Tx: EmployeeTx;

    /// Begin a read-committed transaction
    async fn begin(&self) -> StoreResult<Self::Tx>;
}

/// One open unit of work
#[async_trait]
pub trait EmployeeTx: Send {
    /// Insert a new employee under a server-assigned id
    async fn insert_employee(&mut self, id: Uuid, employee: &EmployeeCreate) -> StoreResult<()>;

    /// Mark an active employee as deleted.
    ///
    /// Unknown or already deleted ids affect nothing and are not an error.
    async fn soft_delete_employee(&mut self, id: Uuid) -> StoreResult<()>;

    /// Vacation days of an active employee, [`StoreError::NotFound`] otherwise
    async fn vacation_days(&mut self, id: Uuid) -> StoreResult<u32>;

    /// Active employees whose full name starts with `query`, ignoring case.
    ///
    /// An empty query matches every active employee.
    async fn search_employees(&mut self, query: &str) -> StoreResult<Vec<Employee>>;

    async fn commit(self) -> StoreResult<()>;

    async fn rollback(self) -> StoreResult<()>;
}
