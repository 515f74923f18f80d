//! Domain types for the contact relay and ID-card harness

pub mod contact;
pub mod player;

pub use contact::{ContactRequest, MessageAttachment, OutboundMessage, ValidationError};
pub use player::PlayerRecord;
