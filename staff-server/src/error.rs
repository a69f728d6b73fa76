//! Store → API error mapping
//!
//! Every storage failure, a missing employee included, surfaces as a
//! `DatabaseError` (HTTP 500) carrying the raw error text.

use shared::error::AppError;

use crate::db::StoreError;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::database(err.to_string())
    }
}
