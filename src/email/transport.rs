//! Email transport trait and error types

use crate::domain::OutboundMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Classified transport failures
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("SMTP credentials not configured")]
    MissingCredentials,

    #[error("Send timed out")]
    Timeout,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Send failed: {0}")]
    Other(String),
}

impl TransportError {
    /// Short kind label used in diagnostics responses
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::Timeout => "timeout",
            Self::Auth(_) => "auth",
            Self::Network(_) => "network",
            Self::InvalidConfiguration(_) => "invalid_configuration",
            Self::Other(_) => "send_failed",
        }
    }

    /// User-facing message for the contact form response
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials => {
                "Email service is not available. Please try again later."
            }
            Self::Timeout => "The email service took too long to respond. Please try again later.",
            Self::Auth(_) => {
                "The email service rejected our credentials. Please contact the site administrator."
            }
            Self::Network(_) => "Could not reach the email service. Please try again later.",
            Self::InvalidConfiguration(_) => {
                "Email service is misconfigured. Please contact the site administrator."
            }
            Self::Other(_) => "Failed to send your message. Please try again later.",
        }
    }

    /// Remediation hints for the `/email-test` troubleshooting list
    pub fn hints(&self) -> Vec<&'static str> {
        match self {
            Self::MissingCredentials => vec![
                "Set EMAIL_USER and EMAIL_PASS in the environment",
                "Restart the server after changing credentials",
            ],
            Self::Timeout => vec![
                "The SMTP server did not answer within the deadline",
                "Try again later; the provider may be throttling connections",
            ],
            Self::Auth(_) => vec![
                "Check that EMAIL_USER and EMAIL_PASS are correct",
                "For Gmail accounts use an app password, not the account password",
            ],
            Self::Network(_) => vec![
                "Check outbound connectivity to the SMTP relay on port 587",
                "Check whether a firewall is blocking SMTP traffic",
            ],
            Self::InvalidConfiguration(_) | Self::Other(_) => vec![
                "Check the server logs for the full provider error",
            ],
        }
    }
}

/// Result of a successful dispatch
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Provider-assigned message id, when the provider reports one
    pub message_id: Option<String>,
}

/// Trait for outbound mail transports
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Dispatch an outbound message
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, TransportError>;

    /// Verify connectivity and authentication against the provider
    async fn test_connection(&self) -> Result<(), TransportError>;
}
