//! Error types for the gist proxy
//!
//! Provides unified error handling using thiserror. Every variant knows how to
//! render itself as an HTTP response; upstream bodies and transport details are
//! never forwarded to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Display name of the upstream service used in client-facing messages.
pub const UPSTREAM_NAME: &str = "GitHub API";

// == Proxy Error Enum ==
/// Unified error type for the gist proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// A query parameter violates its constraints
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Upstream answered with a non-success status code
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    /// Upstream could not be reached (DNS, connect, TLS, timeout)
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// Upstream answered 2xx but the body was not JSON
    #[error("Upstream returned an invalid payload: {0}")]
    UpstreamPayload(String),

    /// Configuration rejected at startup
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ProxyError {
    /// Builds a validation error for the named query parameter.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status this error is surfaced with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            // from_u16 rejects anything outside 100..=999
            ProxyError::UpstreamStatus(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::UpstreamUnreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::UpstreamPayload(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ProxyError::Validation { field, message } => ErrorResponse::for_field(field, message),
            ProxyError::UpstreamStatus(_) => ErrorResponse::new(format!("{UPSTREAM_NAME} error")),
            ProxyError::UpstreamUnreachable(_) => {
                ErrorResponse::new(format!("Error connecting to {UPSTREAM_NAME}"))
            }
            ProxyError::UpstreamPayload(_) => {
                ErrorResponse::new(format!("Invalid response from {UPSTREAM_NAME}"))
            }
            ProxyError::InvalidConfig(_) => ErrorResponse::new("Internal server error"),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gist proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
