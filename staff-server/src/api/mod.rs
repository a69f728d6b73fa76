//! HTTP transport

pub mod employee;
pub mod health;
pub mod middleware;

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use shared::error::AppError;
use tower::{BoxError, ServiceBuilder};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

/// Hard deadline for every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Header carrying the request identifier in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        // Employee API - basic auth required
        .merge(employee::router())
        // Health API - public route
        .merge(health::router())
}

/// Build the fully configured application
pub fn build_app(state: AppState) -> Router {
    build_router()
        // Timeout - dropping the handler future cancels its database work
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(REQUEST_TIMEOUT),
        )
        // Request logging - opens the span carrying request_id
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Copy the request ID onto the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost, keeps a client-supplied ID
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!(timeout_ms = REQUEST_TIMEOUT.as_millis() as u64, "Request timed out");
        AppError::timeout()
    } else {
        AppError::internal(err.to_string())
    }
}
