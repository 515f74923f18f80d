//! Member ID-card generation and emailing harness
//!
//! Used for manual testing of the member ID-card flow. Not mounted on
//! the HTTP router. Rendering is deliberately minimal; the contract is
//! the boundary: a malformed record fails, a well-formed one yields a
//! card file that can be mailed to the member.

use crate::domain::contact::sanitize;
use crate::domain::{MessageAttachment, OutboundMessage, PlayerRecord};
use crate::email::{EmailTransport, SendReceipt, TransportError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum IdCardError {
    #[error("Malformed player record: {0} is empty")]
    MalformedRecord(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Render an ID card for the record into `out_dir`.
///
/// Fails on a malformed record (any required field empty) before
/// touching the filesystem.
pub fn generate_id_card(record: &PlayerRecord, out_dir: &Path) -> Result<PathBuf, IdCardError> {
    if let Some(field) = record.first_missing_field() {
        return Err(IdCardError::MalformedRecord(field));
    }

    let path = out_dir.join(format!("idcard-{}.svg", record.member_id));
    fs::write(&path, render_card(record))?;
    info!("generated ID card at {}", path.display());
    Ok(path)
}

fn render_card(record: &PlayerRecord) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"250\">\n\
         \x20 <rect width=\"400\" height=\"250\" fill=\"#ffffff\" stroke=\"#004488\" stroke-width=\"4\"/>\n\
         \x20 <text x=\"20\" y=\"50\" font-size=\"22\" fill=\"#004488\">TSV Member ID</text>\n\
         \x20 <text x=\"20\" y=\"110\" font-size=\"18\">{name}</text>\n\
         \x20 <text x=\"20\" y=\"150\" font-size=\"14\">Team: {team}</text>\n\
         \x20 <text x=\"20\" y=\"190\" font-size=\"14\">Member no: {member_id}</text>\n\
         </svg>\n",
        name = sanitize(&record.full_name()),
        team = sanitize(&record.team),
        member_id = sanitize(&record.member_id),
    )
}

/// Mail the generated card to the member as an attachment.
pub async fn send_id_card_email<T: EmailTransport>(
    transport: &T,
    sender: &str,
    record: &PlayerRecord,
    card_path: &Path,
) -> Result<SendReceipt, IdCardError> {
    if let Some(field) = record.first_missing_field() {
        return Err(IdCardError::MalformedRecord(field));
    }

    let content = fs::read(card_path)?;
    let filename = card_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("idcard-{}.svg", record.member_id));

    let name = sanitize(&record.full_name());
    let message = OutboundMessage {
        from: format!("\"TSV Website\" <{sender}>"),
        to: record.email.clone(),
        subject: format!("Your TSV member ID card ({})", record.member_id),
        html_body: format!(
            "<p>Hello {name},</p>\n\
             <p>your member ID card is attached. Please bring it to your next match.</p>\n\
             <p>Your TSV</p>\n"
        ),
        text_body: format!(
            "Hello {name},\n\nyour member ID card is attached. Please bring it to your next match.\n\nYour TSV\n"
        ),
        attachment: Some(MessageAttachment {
            filename,
            content_type: "image/svg+xml".to_string(),
            content,
        }),
    };

    let receipt = transport.send(&message).await?;
    info!(
        "ID card emailed to {}, message_id: {:?}",
        record.email, receipt.message_id
    );
    Ok(receipt)
}
