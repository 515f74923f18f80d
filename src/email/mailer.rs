//! Transporter lifecycle management
//!
//! The mailer is built once at process start: credentials are read,
//! the SMTP client is constructed and verified, and the resulting
//! state is published read-only through the application state. There
//! is exactly one write (here), then only reads, so no locking is
//! required.

use super::smtp::SmtpMailer;
use super::transport::{EmailTransport, SendReceipt, TransportError};
use crate::config::Config;
use crate::domain::OutboundMessage;
use tracing::{error, info, warn};

/// Lifecycle state of the outbound-mail client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransporterState {
    Uninitialized,
    Ready,
    Failed(String),
}

impl TransporterState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Owns the outbound-mail client and its verification outcome
pub struct Mailer<T: EmailTransport> {
    state: TransporterState,
    /// Retained only when verification succeeded
    transport: Option<T>,
    /// The account the relay sends from (and to)
    sender: Option<String>,
}

impl<T: EmailTransport> Mailer<T> {
    /// A mailer that verified successfully
    pub fn ready(transport: T, sender: impl Into<String>) -> Self {
        Self {
            state: TransporterState::Ready,
            transport: Some(transport),
            sender: Some(sender.into()),
        }
    }

    /// A mailer whose initialization or verification failed
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            state: TransporterState::Failed(reason.into()),
            transport: None,
            sender: None,
        }
    }

    pub fn state(&self) -> &TransporterState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == TransporterState::Ready
    }

    /// The stored failure reason, if any
    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            TransporterState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// The transport and sender account, available iff the mailer is ready
    pub fn ready_parts(&self) -> Option<(&T, &str)> {
        match (&self.transport, &self.sender) {
            (Some(transport), Some(sender)) => Some((transport, sender)),
            _ => None,
        }
    }

    /// Dispatch through the retained transport
    pub async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, TransportError> {
        match self.ready_parts() {
            Some((transport, _)) => transport.send(message).await,
            None => Err(TransportError::Other(
                self.last_error()
                    .unwrap_or("transporter not initialized")
                    .to_string(),
            )),
        }
    }
}

impl Mailer<SmtpMailer> {
    /// Build and verify the SMTP client from configuration.
    ///
    /// Missing credentials short-circuit to `Failed` without
    /// constructing a client. A client that fails verification is
    /// discarded.
    pub async fn initialize(config: &Config) -> Self {
        let (user, pass) = match (&config.email_user, &config.email_pass) {
            (Some(user), Some(pass)) => (user.clone(), pass.clone()),
            _ => {
                warn!("EMAIL_USER/EMAIL_PASS not set, transporter disabled");
                return Self::failed(TransportError::MissingCredentials.to_string());
            }
        };

        let transport = match SmtpMailer::new(&user, &pass) {
            Ok(transport) => transport,
            Err(e) => {
                error!("Failed to construct SMTP transport: {}", e);
                return Self::failed(e.to_string());
            }
        };

        match transport.test_connection().await {
            Ok(()) => {
                info!("SMTP transporter verified, sending as {}", user);
                Self::ready(transport, user)
            }
            Err(e) => {
                error!("SMTP verification failed: {}", e);
                Self::failed(e.to_string())
            }
        }
    }
}
