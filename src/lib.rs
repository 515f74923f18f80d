//! clubmail - Club Website Mail Backend
//!
//! This crate provides the mail backend for the club website: the
//! contact-form relay, transporter diagnostics, and the member
//! ID-card generation/emailing harness.

pub mod api;
pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod idcard;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
