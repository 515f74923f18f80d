//! Contact form domain types, validation and sanitization

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Incoming contact form submission
///
/// All fields default to empty so that absent JSON keys surface as
/// validation errors naming the missing fields rather than as a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Validation failures for a contact submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Please provide a valid email address")]
    InvalidEmail,
}

/// Check presence of required fields and email shape.
///
/// The email check is deliberately narrow: at least one `@`, at least
/// one `.` somewhere after the last `@`, and no whitespace anywhere.
pub fn validate(req: &ContactRequest) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if req.name.is_empty() {
        missing.push("name");
    }
    if req.email.is_empty() {
        missing.push("email");
    }
    if req.subject.is_empty() {
        missing.push("subject");
    }
    if req.message.is_empty() {
        missing.push("message");
    }
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    if !is_valid_email(&req.email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.rfind('@') {
        Some(at) if at > 0 => email[at + 1..].contains('.'),
        _ => false,
    }
}

/// Strip every `<` and `>` from the string.
///
/// This is the narrow XSS mitigation the relay has always applied, not
/// full HTML-entity escaping. The output format is load-bearing:
/// `"<script>"` must come out as `"script"`.
pub fn sanitize(s: &str) -> String {
    s.chars().filter(|c| *c != '<' && *c != '>').collect()
}

/// A contact submission after sanitization
#[derive(Debug, Clone)]
pub struct SanitizedContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Apply [`sanitize`] to every free-text field independently.
///
/// A phone field that is empty after sanitization is treated as absent.
pub fn sanitize_request(req: &ContactRequest) -> SanitizedContact {
    SanitizedContact {
        name: sanitize(&req.name),
        email: sanitize(&req.email),
        phone: req
            .phone
            .as_deref()
            .map(sanitize)
            .filter(|p| !p.is_empty()),
        subject: sanitize(&req.subject),
        message: sanitize(&req.message),
    }
}

/// File attached to an outbound message
#[derive(Debug, Clone)]
pub struct MessageAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Fully composed message ready for dispatch
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub attachment: Option<MessageAttachment>,
}
