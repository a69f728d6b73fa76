//! In-memory record store
//!
//! Same contract as the PostgreSQL store. Writes are buffered in the
//! transaction and published on commit; reads see committed rows overlaid
//! with the transaction's own writes (read-committed).

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use shared::models::{Employee, EmployeeCreate};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::{EmployeeStore, EmployeeTx, StoreError, StoreResult};

type Rows = Arc<Mutex<HashMap<Uuid, Employee>>>;

#[derive(Clone, Default)]
pub struct MemoryStore {
    rows: Rows,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed row by id, including fired employees
    pub fn get(&self, id: Uuid) -> Option<Employee> {
        self.rows.lock().get(&id).cloned()
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> StoreResult<MemoryTx> {
        Ok(MemoryTx {
            rows: self.rows.clone(),
            pending: HashMap::new(),
        })
    }
}

pub struct MemoryTx {
    rows: Rows,
    pending: HashMap<Uuid, Employee>,
}

impl MemoryTx {
    fn current(&self, id: Uuid) -> Option<Employee> {
        self.pending
            .get(&id)
            .cloned()
            .or_else(|| self.rows.lock().get(&id).cloned())
    }
}

#[async_trait]
impl EmployeeTx for MemoryTx {
    async fn insert_employee(&mut self, id: Uuid, employee: &EmployeeCreate) -> StoreResult<()> {
        if self.current(id).is_some() {
            return Err(StoreError::Duplicate(id));
        }
        self.pending
            .insert(id, Employee::hired(id, employee, Utc::now()));
        Ok(())
    }

    async fn soft_delete_employee(&mut self, id: Uuid) -> StoreResult<()> {
        if let Some(mut employee) = self.current(id)
            && employee.is_active()
        {
            employee.deleted_at = Some(Utc::now());
            self.pending.insert(id, employee);
        }
        Ok(())
    }

    async fn vacation_days(&mut self, id: Uuid) -> StoreResult<u32> {
        self.current(id)
            .filter(Employee::is_active)
            .map(|e| e.vacation_days)
            .ok_or(StoreError::NotFound(id))
    }

    async fn search_employees(&mut self, query: &str) -> StoreResult<Vec<Employee>> {
        let prefix = query.to_lowercase();

        let mut visible = self.rows.lock().clone();
        visible.extend(self.pending.iter().map(|(id, e)| (*id, e.clone())));

        let mut found: Vec<Employee> = visible
            .into_values()
            .filter(|e| e.is_active() && e.fullname.to_lowercase().starts_with(&prefix))
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn commit(self) -> StoreResult<()> {
        self.rows.lock().extend(self.pending);
        Ok(())
    }

    async fn rollback(self) -> StoreResult<()> {
        Ok(())
    }
}
