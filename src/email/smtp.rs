//! SMTP email transport implementation using lettre

use super::transport::{EmailTransport, SendReceipt, TransportError};
use crate::domain::OutboundMessage;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// The managed SMTP provider the relay is bound to
pub const SMTP_RELAY: &str = "smtp.gmail.com";

/// SMTP-based transport for the club mailbox
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a transport bound to the fixed relay with the given credentials
    pub fn new(user: &str, pass: &str) -> Result<Self, TransportError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_RELAY)
            .map_err(|e| TransportError::InvalidConfiguration(e.to_string()))?
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();

        Ok(Self { transport })
    }

    fn build_message(message: &OutboundMessage) -> Result<Message, TransportError> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| TransportError::InvalidConfiguration(format!("Invalid from address: {e}")))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| TransportError::InvalidConfiguration(format!("Invalid to address: {e}")))?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject);

        let alternative = MultiPart::alternative()
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(message.text_body.clone()),
            )
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(message.html_body.clone()),
            );

        let email = if let Some(attachment) = &message.attachment {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| TransportError::InvalidConfiguration(format!("Invalid content type: {e}")))?;
            let part = Attachment::new(attachment.filename.clone())
                .body(attachment.content.clone(), content_type);
            builder.multipart(MultiPart::mixed().multipart(alternative).singlepart(part))
        } else {
            builder.multipart(alternative)
        };

        email.map_err(|e| TransportError::Other(e.to_string()))
    }
}

/// Classify a provider error by its text.
///
/// lettre's SMTP error type does not distinguish auth from network
/// failures, so the mapping matches the provider's error text. Known
/// fragility: if the provider rewords its errors, failures fall
/// through to `Other` and lose their specific hint.
fn classify(detail: String) -> TransportError {
    let lowered = detail.to_lowercase();
    if lowered.contains("timeout") || lowered.contains("timed out") {
        TransportError::Timeout
    } else if detail.contains("Invalid login")
        || lowered.contains("authentication")
        || detail.contains("AUTH")
        || detail.contains("535")
    {
        TransportError::Auth(detail)
    } else if detail.contains("Network") || lowered.contains("connection") {
        TransportError::Network(detail)
    } else {
        TransportError::Other(detail)
    }
}

#[async_trait]
impl EmailTransport for SmtpMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, TransportError> {
        let email = Self::build_message(message)?;

        match self.transport.send(email).await {
            Ok(response) => {
                let message_id = response.message().next().map(|s| s.to_string());
                Ok(SendReceipt { message_id })
            }
            Err(e) => Err(classify(e.to_string())),
        }
    }

    async fn test_connection(&self) -> Result<(), TransportError> {
        self.transport
            .test_connection()
            .await
            .map(|_| ())
            .map_err(|e| classify(e.to_string()))
    }
}
