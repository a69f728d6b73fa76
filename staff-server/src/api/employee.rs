//! Employee endpoints
//!
//! | Endpoint | Method | Input |
//! |---|---|---|
//! | `/hire` | POST | JSON [`EmployeeCreate`] |
//! | `/fire` | DELETE | `?id=<uuid>` |
//! | `/vacation_days` | GET | `?id=<uuid>` |
//! | `/search` | GET | `?query=<prefix>` |

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{Employee, EmployeeCreate};
use uuid::Uuid;

use super::middleware::require_basic_auth;
use crate::state::AppState;

/// Employee router - requires basic auth
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hire", post(hire_employee))
        .route("/fire", delete(fire_employee))
        .route("/vacation_days", get(vacation_days))
        .route("/search", get(search_employees))
        .route_layer(axum_middleware::from_fn(require_basic_auth))
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VacationResponse {
    pub vacation_days: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub employees: Vec<Employee>,
}

/// Extract and parse the `id` query parameter
fn employee_id(query: Result<Query<IdQuery>, QueryRejection>) -> AppResult<Uuid> {
    let Query(IdQuery { id }) = query.map_err(|e| AppError::invalid_request(e.body_text()))?;
    Uuid::parse_str(&id).map_err(|e| AppError::invalid_format(e.to_string()))
}

/// POST /hire
///
/// The body is decoded regardless of its content type. The generated id is
/// not echoed back.
pub async fn hire_employee(State(state): State<AppState>, body: Bytes) -> AppResult<StatusCode> {
    let employee: EmployeeCreate =
        serde_json::from_slice(&body).map_err(|e| AppError::invalid_request(e.to_string()))?;

    let id = state.service.hire_employee(employee).await?;

    tracing::debug!(employee_id = %id, "success");
    Ok(StatusCode::OK)
}

/// DELETE /fire
pub async fn fire_employee(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> AppResult<StatusCode> {
    let id = employee_id(query)?;

    state.service.fire_employee(id).await?;

    tracing::debug!(employee_id = %id, "success");
    Ok(StatusCode::OK)
}

/// GET /vacation_days
pub async fn vacation_days(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> AppResult<Json<VacationResponse>> {
    let id = employee_id(query)?;

    let vacation_days = state.service.vacation_days(id).await?;

    tracing::debug!(employee_id = %id, vacation_days, "success");
    Ok(Json(VacationResponse { vacation_days }))
}

/// GET /search
pub async fn search_employees(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Query(SearchQuery { query }) =
        query.map_err(|e| AppError::invalid_request(e.body_text()))?;

    let employees = state.service.search_employees(&query).await?;

    tracing::debug!(query = %query, found = employees.len(), "success");
    Ok(Json(SearchResponse { employees }))
}
