//! Transporter diagnostics (`GET /email-test`, `GET /health`)

use crate::config::Config;
use crate::email::{EmailTransport, TransportError};
use crate::state::HasMailer;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// Deadline for the live verification in `/email-test`
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-credential presence snapshot
#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    #[serde(rename = "EMAIL_USER")]
    pub email_user: &'static str,
    #[serde(rename = "EMAIL_PASS")]
    pub email_pass: &'static str,
}

impl CredentialStatus {
    fn from_config(config: &Config) -> Self {
        let presence = |set: bool| if set { "set" } else { "missing" };
        Self {
            email_user: presence(config.email_user.is_some()),
            email_pass: presence(config.email_pass.is_some()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub transporter: TransporterSnapshot,
    pub credentials: CredentialStatus,
}

#[derive(Debug, Serialize)]
pub struct TransporterSnapshot {
    pub state: &'static str,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint: synchronous snapshot, no network call, 200 always
pub async fn health<S: HasMailer>(State(state): State<S>) -> impl IntoResponse {
    let mailer = state.mailer();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        transporter: TransporterSnapshot {
            state: mailer.state().label(),
            ready: mailer.is_ready(),
            error: mailer.last_error().map(str::to_string),
        },
        credentials: CredentialStatus::from_config(state.config()),
    })
}

#[derive(Debug, Serialize)]
pub struct EmailTestResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub credentials: CredentialStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub troubleshooting: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Live transporter check: reports credential presence and runs a
/// fresh verification against the provider, bounded by a deadline.
pub async fn email_test<S: HasMailer>(State(state): State<S>) -> Response {
    let config = state.config();
    let mailer = state.mailer();
    let credentials = CredentialStatus::from_config(config);

    let Some((transport, sender)) = mailer.ready_parts() else {
        let detail = mailer
            .last_error()
            .unwrap_or("transporter not initialized")
            .to_string();
        let hints = if config.email_user.is_none() || config.email_pass.is_none() {
            TransportError::MissingCredentials.hints()
        } else {
            TransportError::Other(detail.clone()).hints()
        };
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(EmailTestResponse {
                success: false,
                message: "Email transporter is not ready".to_string(),
                account: None,
                credentials,
                troubleshooting: Some(hints),
                error: Some(detail).filter(|_| config.expose_error_details()),
            }),
        )
            .into_response();
    };

    let verification = match tokio::time::timeout(VERIFY_TIMEOUT, transport.test_connection()).await
    {
        Ok(result) => result,
        Err(_elapsed) => {
            warn!(
                "verification exceeded {}s deadline",
                VERIFY_TIMEOUT.as_secs()
            );
            Err(TransportError::Timeout)
        }
    };

    match verification {
        Ok(()) => (
            StatusCode::OK,
            Json(EmailTestResponse {
                success: true,
                message: "SMTP connection verified".to_string(),
                account: Some(sender.to_string()),
                credentials,
                troubleshooting: None,
                error: None,
            }),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(EmailTestResponse {
                success: false,
                message: err.user_message().to_string(),
                account: Some(sender.to_string()),
                credentials,
                troubleshooting: Some(err.hints()),
                error: Some(err.to_string()).filter(|_| config.expose_error_details()),
            }),
        )
            .into_response(),
    }
}
