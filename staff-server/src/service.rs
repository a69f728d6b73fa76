//! Business service
//!
//! One method per use case, each running exactly one store call inside its
//! own transaction. Store errors are returned as-is.

use async_trait::async_trait;
use shared::models::{Employee, EmployeeCreate};
use uuid::Uuid;

use crate::db::{EmployeeStore, EmployeeTx, StoreResult};

/// Employee use cases, as seen by the HTTP layer
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Hire an employee, returning the freshly generated id
    async fn hire_employee(&self, employee: EmployeeCreate) -> StoreResult<Uuid>;

    /// Fire (soft-delete) an employee; unknown ids are not an error
    async fn fire_employee(&self, employee_id: Uuid) -> StoreResult<()>;

    async fn vacation_days(&self, employee_id: Uuid) -> StoreResult<u32>;

    async fn search_employees(&self, query: &str) -> StoreResult<Vec<Employee>>;
}

/// [`EmployeeService`] over any [`EmployeeStore`]
///
/// Early returns drop the open transaction, which rolls it back.
#[derive(Clone)]
pub struct StaffService<S> {
    store: S,
}

impl<S: EmployeeStore> StaffService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: EmployeeStore> EmployeeService for StaffService<S> {
    async fn hire_employee(&self, employee: EmployeeCreate) -> StoreResult<Uuid> {
        let mut tx = self.store.begin().await?;

        let id = Uuid::new_v4();
        tx.insert_employee(id, &employee).await?;
        tx.commit().await?;

        tracing::info!(employee_id = %id, "Employee hired");
        Ok(id)
    }

    async fn fire_employee(&self, employee_id: Uuid) -> StoreResult<()> {
        let mut tx = self.store.begin().await?;
        tx.soft_delete_employee(employee_id).await?;
        tx.commit().await?;

        tracing::info!(employee_id = %employee_id, "Employee fired");
        Ok(())
    }

    async fn vacation_days(&self, employee_id: Uuid) -> StoreResult<u32> {
        let mut tx = self.store.begin().await?;
        let days = tx.vacation_days(employee_id).await?;
        tx.commit().await?;
        Ok(days)
    }

    async fn search_employees(&self, query: &str) -> StoreResult<Vec<Employee>> {
        let mut tx = self.store.begin().await?;
        let employees = tx.search_employees(query).await?;
        tx.commit().await?;
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, StoreError};
    use shared::models::Gender;

    fn service() -> StaffService<MemoryStore> {
        StaffService::new(MemoryStore::new())
    }

    fn ada() -> EmployeeCreate {
        EmployeeCreate {
            fullname: "Ada Lovelace".to_string(),
            gender: Gender::Female,
            age: 30,
            email: "a@x.com".to_string(),
            address: "London".to_string(),
            vacation_days: 14,
        }
    }

    #[tokio::test]
    async fn test_hire_generates_fresh_ids() {
        let service = service();

        let first = service.hire_employee(ada()).await.unwrap();
        let second = service.hire_employee(ada()).await.unwrap();

        assert_ne!(first, second);
        assert!(!first.is_nil());
        assert_eq!(service.store().get(first).unwrap().fullname, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_vacation_days_after_hire() {
        let service = service();
        let id = service.hire_employee(ada()).await.unwrap();

        assert_eq!(service.vacation_days(id).await.unwrap(), 14);
    }

    #[tokio::test]
    async fn test_fire_unknown_employee_succeeds() {
        let service = service();
        service.fire_employee(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn test_fired_employee_is_absent() {
        let service = service();
        let id = service.hire_employee(ada()).await.unwrap();

        service.fire_employee(id).await.unwrap();
        service.fire_employee(id).await.unwrap();

        let err = service.vacation_days(id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(service.search_employees("ada").await.unwrap().is_empty());
        assert!(service.store().get(id).unwrap().deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_empty_query_returns_all_active() {
        let service = service();
        service.hire_employee(ada()).await.unwrap();
        let fired = service
            .hire_employee(EmployeeCreate {
                fullname: "Charles Babbage".to_string(),
                ..ada()
            })
            .await
            .unwrap();
        service
            .hire_employee(EmployeeCreate {
                fullname: "Grace Hopper".to_string(),
                ..ada()
            })
            .await
            .unwrap();
        service.fire_employee(fired).await.unwrap();

        let all = service.search_employees("").await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|e| e.id != fired));
    }
}
