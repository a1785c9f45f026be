//! Response DTOs for the gist proxy
//!
//! Defines the structure of outgoing HTTP response bodies.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

/// Upstream payload rendered as 2-space indented JSON.
///
/// Object keys keep the order the upstream sent them in.
#[derive(Debug, Clone, PartialEq)]
pub struct PrettyJson(pub Value);

impl PrettyJson {
    /// Renders the payload exactly as it is written to the response body.
    pub fn render(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(&self.0)
    }
}

impl IntoResponse for PrettyJson {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(body) => (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(err) => {
                tracing::error!("failed to serialize payload: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Client-facing description of what went wrong
    pub detail: String,
    /// Query parameter responsible for a validation failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            field: None,
        }
    }

    /// Creates an ErrorResponse pointing at a query parameter
    pub fn for_field(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            field: Some(field.into()),
        }
    }
}
