//! Health check endpoint

use axum::{Json, Router, routing::get};

use crate::state::AppState;

/// Health router - public route (no auth)
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "staff-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
