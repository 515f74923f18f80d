//! Contact form send pipeline (`POST /send-email`)

use crate::api::failure_response;
use crate::domain::contact::{sanitize_request, validate, ContactRequest};
use crate::email::compose::compose;
use crate::email::TransportError;
use crate::error::AppError;
use crate::state::HasMailer;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

/// Deadline for a single dispatch attempt
pub const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Response body for a successful send
#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

/// Handle a contact form submission.
///
/// Pipeline: readiness check, validation, sanitization, composition,
/// dispatch with deadline, outcome mapping. The deadline is soft: a
/// send that loses the race keeps running and may still be delivered
/// even though the caller saw a timeout failure.
pub async fn send_email<S: HasMailer>(
    State(state): State<S>,
    Json(request): Json<ContactRequest>,
) -> Response {
    let config = state.config();
    let mailer = state.mailer();

    let Some((_, sender)) = mailer.ready_parts() else {
        let detail = mailer
            .last_error()
            .unwrap_or("transporter not initialized")
            .to_string();
        error!("send-email rejected, transporter not ready: {}", detail);
        return failure_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Email service is not available. Please try again later.",
            Some(detail),
            config.expose_error_details(),
        );
    };

    if let Err(err) = validate(&request) {
        return AppError::Validation(err).into_response();
    }

    let contact = sanitize_request(&request);
    let message = compose(&contact, sender);

    // The send runs as its own task so that losing the race only
    // abandons it from the caller's perspective; the attempt itself
    // keeps running and the message may still be delivered.
    let send_task = {
        let mailer = mailer.clone();
        tokio::spawn(async move { mailer.send(&message).await })
    };

    let outcome = match tokio::time::timeout(SEND_TIMEOUT, send_task).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_err)) => {
            error!("send task failed: {}", join_err);
            Err(TransportError::Other(join_err.to_string()))
        }
        Err(_elapsed) => {
            warn!(
                "send attempt exceeded {}s deadline, abandoning (underlying send not cancelled)",
                SEND_TIMEOUT.as_secs()
            );
            Err(TransportError::Timeout)
        }
    };

    match outcome {
        Ok(receipt) => {
            info!(
                "contact form message relayed, message_id: {:?}",
                receipt.message_id
            );
            (
                StatusCode::OK,
                Json(SendEmailResponse {
                    success: true,
                    message: "Your message has been sent successfully.".to_string(),
                    message_id: receipt.message_id,
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!("contact form send failed ({}): {}", err.kind(), err);
            failure_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                err.user_message(),
                Some(err.to_string()),
                config.expose_error_details(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_email_response_serialization() {
        let response = SendEmailResponse {
            success: true,
            message: "Your message has been sent successfully.".to_string(),
            message_id: Some("msg-123".to_string()),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"messageId\":\"msg-123\""));
    }

    #[test]
    fn test_message_id_omitted_when_absent() {
        let response = SendEmailResponse {
            success: false,
            message: "Missing required fields: name".to_string(),
            message_id: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("messageId"));
    }
}
