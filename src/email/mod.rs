//! Email sending for the club website
//!
//! - transport trait and failure classification
//! - SMTP transport (lettre) bound to the managed provider
//! - transporter lifecycle management
//! - contact notification composition

pub mod compose;
pub mod mailer;
pub mod smtp;
pub mod transport;

pub use mailer::{Mailer, TransporterState};
pub use smtp::SmtpMailer;
pub use transport::{EmailTransport, SendReceipt, TransportError};
