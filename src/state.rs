//! Application state trait for dependency injection
//!
//! Handlers are generic over this trait so the same handler code runs
//! against the production `AppState` and test states carrying a stub
//! transport.

use crate::config::Config;
use crate::email::{EmailTransport, Mailer};
use std::sync::Arc;

/// Trait for application state that provides the mailer and configuration
pub trait HasMailer: Clone + Send + Sync + 'static {
    /// The outbound-mail transport type
    type Transport: EmailTransport + 'static;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the transporter manager.
    ///
    /// Handed out as an `Arc` so the send pipeline can move a handle
    /// into a spawned task and race it against the deadline without
    /// cancelling the underlying send.
    fn mailer(&self) -> &Arc<Mailer<Self::Transport>>;
}
