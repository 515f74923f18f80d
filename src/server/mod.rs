//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::email::{Mailer, SmtpMailer};
use crate::state::HasMailer;
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mailer: Arc<Mailer<SmtpMailer>>,
}

impl HasMailer for AppState {
    type Transport = SmtpMailer;

    fn config(&self) -> &Config {
        &self.config
    }

    fn mailer(&self) -> &Arc<Mailer<Self::Transport>> {
        &self.mailer
    }
}

/// Run the server.
///
/// The transporter is initialized and verified before the listener
/// starts accepting requests; afterwards its state is read-only.
pub async fn run(config: Config) -> Result<()> {
    let mailer = Mailer::initialize(&config).await;

    let state = AppState {
        config: Arc::new(config.clone()),
        mailer: Arc::new(mailer),
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router with generic state type
///
/// This function is generic over the state type, allowing it to work
/// with both the production `AppState` and test implementations of
/// `HasMailer`.
pub fn build_router<S: HasMailer>(state: S) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/send-email", post(api::contact::send_email::<S>))
        .route("/email-test", get(api::diagnostics::email_test::<S>))
        .route("/health", get(api::diagnostics::health::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
