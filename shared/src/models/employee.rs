//! Employee Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender, carried on the wire and in storage as an integer code
///
/// Codes other than 0 and 1 are kept as-is in [`Gender::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other(i32),
}

impl Gender {
    #[inline]
    pub const fn code(&self) -> i32 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Other(code) => *code,
        }
    }
}

impl From<Gender> for i32 {
    #[inline]
    fn from(gender: Gender) -> Self {
        gender.code()
    }
}

impl From<i32> for Gender {
    fn from(code: i32) -> Self {
        match code {
            0 => Gender::Male,
            1 => Gender::Female,
            other => Gender::Other(other),
        }
    }
}

/// Employee record as stored and returned by search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub fullname: String,
    pub gender: Gender,
    pub age: u32,
    pub email: String,
    pub address: String,
    pub vacation_days: u32,
    pub created_at: DateTime<Utc>,
    /// Set once when the employee is fired, never cleared
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// Build a freshly hired employee from the hire payload
    pub fn hired(id: Uuid, data: &EmployeeCreate, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fullname: data.fullname.clone(),
            gender: data.gender,
            age: data.age,
            email: data.email.clone(),
            address: data.address.clone(),
            vacation_days: data.vacation_days,
            created_at,
            deleted_at: None,
        }
    }

    /// Active employees have not been fired
    #[inline]
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Hire payload
///
/// Missing fields fall back to their defaults. Server-owned fields
/// (`id`, `created_at`, `deleted_at`) are ignored if present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeCreate {
    pub fullname: String,
    pub gender: Gender,
    pub age: u32,
    pub email: String,
    pub address: String,
    pub vacation_days: u32,
}
