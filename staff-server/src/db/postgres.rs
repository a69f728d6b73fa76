//! PostgreSQL record store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{Employee, EmployeeCreate, Gender};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use super::{EmployeeStore, EmployeeTx, StoreError, StoreResult};
use crate::config::Config;

const CREATE_EMPLOYEE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS employee (
        id UUID NOT NULL PRIMARY KEY,
        fullname VARCHAR(255) NOT NULL DEFAULT '',
        gender INTEGER NOT NULL DEFAULT 0,
        age INTEGER NOT NULL DEFAULT 0,
        email VARCHAR(50) NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        vacation_days INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP(0),
        deleted_at TIMESTAMPTZ
    )
"#;

/// Advisory lock key serializing concurrent schema bootstraps
const SCHEMA_LOCK_KEY: i64 = 0x5354_4146_4621;

/// Connection pool plus schema ownership
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect the pool and make sure the schema exists
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await?;

        tracing::info!(
            max_connections = config.db_max_connections,
            "Connected to PostgreSQL"
        );

        let store = Self::from_pool(pool);
        store.bootstrap_schema().await?;
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the employee table if absent, in its own transaction
    pub async fn bootstrap_schema(&self) -> StoreResult<()> {
        tracing::info!("Ensuring employee table exists");

        let mut tx = self.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx.tx)
            .await?;
        sqlx::query(CREATE_EMPLOYEE_TABLE)
            .execute(&mut *tx.tx)
            .await?;
        tx.commit().await
    }

    /// Close every pooled connection, waiting for checked-out ones
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl EmployeeStore for PgStore {
    type Tx = PgTx;

    async fn begin(&self) -> StoreResult<PgTx> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL READ COMMITTED")
            .execute(&mut *tx)
            .await?;
        Ok(PgTx { tx })
    }
}

/// Open PostgreSQL transaction (rolled back by sqlx on drop)
pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl EmployeeTx for PgTx {
    async fn insert_employee(&mut self, id: Uuid, employee: &EmployeeCreate) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employee (id, fullname, gender, age, email, address, vacation_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(&employee.fullname)
        .bind(employee.gender.code())
        .bind(to_integer("age", employee.age)?)
        .bind(&employee.email)
        .bind(&employee.address)
        .bind(to_integer("vacation_days", employee.vacation_days)?)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn soft_delete_employee(&mut self, id: Uuid) -> StoreResult<()> {
        let result =
            sqlx::query("UPDATE employee SET deleted_at = $2 WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .bind(Utc::now())
                .execute(&mut *self.tx)
                .await?;

        tracing::debug!(employee_id = %id, rows = result.rows_affected(), "Soft delete");
        Ok(())
    }

    async fn vacation_days(&mut self, id: Uuid) -> StoreResult<u32> {
        let days: Option<i32> = sqlx::query_scalar(
            "SELECT vacation_days FROM employee WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        let days = days.ok_or(StoreError::NotFound(id))?;
        from_integer("vacation_days", days)
    }

    async fn search_employees(&mut self, query: &str) -> StoreResult<Vec<Employee>> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, fullname, gender, age, email, address,
                   vacation_days, created_at, deleted_at
            FROM employee
            WHERE deleted_at IS NULL
              AND LOWER(fullname) LIKE (LOWER($1) || '%') ESCAPE '\'
            ORDER BY created_at, id
            "#,
        )
        .bind(escape_like(query))
        .fetch_all(&mut *self.tx)
        .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn commit(self) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> StoreResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

/// Raw `employee` row; INTEGER columns come back as `i32`
#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: Uuid,
    fullname: String,
    gender: i32,
    age: i32,
    email: String,
    address: String,
    vacation_days: i32,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = StoreError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            fullname: row.fullname,
            gender: Gender::from(row.gender),
            age: from_integer("age", row.age)?,
            email: row.email,
            address: row.address,
            vacation_days: from_integer("vacation_days", row.vacation_days)?,
            created_at: row.created_at,
            deleted_at: row.deleted_at,
        })
    }
}

fn to_integer(column: &'static str, value: u32) -> StoreResult<i32> {
    i32::try_from(value).map_err(|_| StoreError::OutOfRange {
        column,
        value: i64::from(value),
    })
}

fn from_integer(column: &'static str, value: i32) -> StoreResult<u32> {
    u32::try_from(value).map_err(|_| StoreError::OutOfRange {
        column,
        value: i64::from(value),
    })
}

/// Escape LIKE metacharacters so the query only ever matches literally
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
