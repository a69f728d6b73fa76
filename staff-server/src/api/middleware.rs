//! Request middleware: basic auth and request logging

use std::time::Instant;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderValue, header};
use shared::error::AppError;
use tracing::{Instrument, debug, info, warn};
use uuid::Uuid;

use super::REQUEST_ID_HEADER;

/// Fixed basic auth credentials
pub const BASIC_AUTH_USERNAME: &str = "username";
pub const BASIC_AUTH_PASSWORD: &str = "password";

const BASIC_CHALLENGE: &str = "Basic realm=\"staff\"";

/// Decode an `Authorization: Basic <base64(user:pass)>` header.
///
/// The scheme name is case-insensitive. Anything unparseable yields `None`.
pub fn parse_basic_auth(value: &HeaderValue) -> Option<(String, String)> {
    let value = value.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Require basic auth middleware
///
/// Missing or malformed credentials → 401 with a challenge;
/// well-formed but wrong credentials → 403.
pub async fn require_basic_auth(req: Request, next: Next) -> Response {
    let credentials = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(parse_basic_auth);

    match credentials {
        Some((username, password))
            if username == BASIC_AUTH_USERNAME && password == BASIC_AUTH_PASSWORD =>
        {
            next.run(req).await
        }
        Some((username, _)) => {
            debug!(username = %username, uri = %req.uri(), "Basic auth rejected");
            AppError::permission_denied("Invalid credentials").into_response()
        }
        None => {
            debug!(uri = %req.uri(), "Basic auth missing");
            (
                [(header::WWW_AUTHENTICATE, BASIC_CHALLENGE)],
                AppError::not_authenticated(),
            )
                .into_response()
        }
    }
}

/// Request logging middleware
///
/// Runs everything downstream inside a `request` span so that every log
/// line of the request, errors included, carries its `request_id`.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("Request started");

        let response = next.run(req).await;

        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        if status.is_server_error() {
            warn!(
                status = status.as_u16(),
                latency_ms,
                "Request completed with server error"
            );
        } else if status.is_client_error() {
            warn!(
                status = status.as_u16(),
                latency_ms,
                "Request completed with client error"
            );
        } else {
            info!(
                status = status.as_u16(),
                latency_ms,
                "Request completed successfully"
            );
        }

        response
    }
    .instrument(span)
    .await
}
