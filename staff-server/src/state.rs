//! Application state

use std::sync::Arc;

use crate::service::EmployeeService;

/// Shared application state, handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Employee use cases
    pub service: Arc<dyn EmployeeService>,
}

impl AppState {
    pub fn new(service: impl EmployeeService + 'static) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
