//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Beyond authentication there are two failure surfaces: client input
    /// errors (400) and everything else (500), timeouts included.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::InvalidFormat => StatusCode::BAD_REQUEST,

            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            Self::PermissionDenied => StatusCode::FORBIDDEN,

            Self::InternalError | Self::DatabaseError | Self::TimeoutError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
