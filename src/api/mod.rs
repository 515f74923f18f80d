//! REST API handlers and shared response types

pub mod contact;
pub mod diagnostics;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;

/// Response body for send failures
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Build a failure response, attaching the raw provider detail only
/// when the configuration allows it (non-production).
pub(crate) fn failure_response(
    status: StatusCode,
    message: impl Into<String>,
    detail: Option<String>,
    expose_details: bool,
) -> Response {
    let body = FailureResponse {
        success: false,
        message: message.into(),
        details: detail.filter(|_| expose_details),
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_response_with_details() {
        let response = failure_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send",
            Some("535 Invalid login".to_string()),
            true,
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_details_dropped_when_hidden() {
        let body = FailureResponse {
            success: false,
            message: "Failed to send".to_string(),
            details: Some("raw".to_string()).filter(|_| false),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("details"));
        assert!(json.contains("\"success\":false"));
    }
}
