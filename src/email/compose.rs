//! Contact notification composition
//!
//! Builds the self-notification email the association receives for
//! each contact-form submission. Pure construction, no I/O.

use crate::domain::contact::SanitizedContact;
use crate::domain::OutboundMessage;
use chrono::{DateTime, Utc};
use chrono_tz::Europe::Berlin;

/// Fixed prefix prepended to the sanitized subject
pub const SUBJECT_PREFIX: &str = "[TSV Website] ";

/// Display name used in the from header
const FROM_NAME: &str = "TSV Website";

/// Build the outbound notification for a sanitized submission.
///
/// Sender and recipient are both the association's own inbox; the
/// visitor's address only appears inside the body as a mailto link.
pub fn compose(contact: &SanitizedContact, sender: &str) -> OutboundMessage {
    compose_at(contact, sender, Utc::now())
}

fn compose_at(contact: &SanitizedContact, sender: &str, now: DateTime<Utc>) -> OutboundMessage {
    let stamp = now
        .with_timezone(&Berlin)
        .format("%d.%m.%Y, %H:%M:%S")
        .to_string();

    OutboundMessage {
        from: format!("\"{FROM_NAME}\" <{sender}>"),
        to: sender.to_string(),
        subject: format!("{SUBJECT_PREFIX}{}", contact.subject),
        html_body: html_body(contact, &stamp),
        text_body: text_body(contact, &stamp),
        attachment: None,
    }
}

fn html_body(contact: &SanitizedContact, stamp: &str) -> String {
    let mut body = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n",
    );
    body.push_str("<h2>New message from the contact form</h2>\n<table>\n");
    body.push_str(&format!(
        "<tr><td><strong>Name:</strong></td><td>{}</td></tr>\n",
        contact.name
    ));
    body.push_str(&format!(
        "<tr><td><strong>Email:</strong></td><td><a href=\"mailto:{email}\">{email}</a></td></tr>\n",
        email = contact.email
    ));
    if let Some(phone) = &contact.phone {
        body.push_str(&format!(
            "<tr><td><strong>Phone:</strong></td><td><a href=\"tel:{phone}\">{phone}</a></td></tr>\n"
        ));
    }
    body.push_str(&format!(
        "<tr><td><strong>Subject:</strong></td><td>{}</td></tr>\n</table>\n",
        contact.subject
    ));
    body.push_str(&format!(
        "<h3>Message</h3>\n<p>{}</p>\n",
        contact.message.replace('\n', "<br>\n")
    ));
    body.push_str(&format!(
        "<hr>\n<p>Received via the club website on {stamp} (Europe/Berlin)</p>\n</body>\n</html>\n"
    ));
    body
}

fn text_body(contact: &SanitizedContact, stamp: &str) -> String {
    let phone_line = match &contact.phone {
        Some(phone) => format!("Phone: {phone}\n"),
        None => String::new(),
    };

    format!(
        "New message from the contact form\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         {phone_line}\
         Subject: {subject}\n\
         \n\
         {message}\n\
         \n\
         --\n\
         Received via the club website on {stamp} (Europe/Berlin)\n",
        name = contact.name,
        email = contact.email,
        subject = contact.subject,
        message = contact.message,
    )
}
