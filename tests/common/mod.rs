//! Shared test fixtures: a stub transport and an in-process router
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use clubmail::config::Config;
use clubmail::domain::OutboundMessage;
use clubmail::email::{EmailTransport, Mailer, SendReceipt, TransportError};
use clubmail::server::build_router;
use clubmail::state::HasMailer;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// What the stub transport does when asked to send or verify
#[derive(Clone)]
pub enum StubBehavior {
    Succeed(Option<String>),
    Fail(TransportError),
    /// Never settles; used with a paused clock to exercise deadlines
    Hang,
}

pub struct StubTransport {
    behavior: StubBehavior,
    pub sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl StubTransport {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl EmailTransport for StubTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<SendReceipt, TransportError> {
        self.sent.lock().unwrap().push(message.clone());
        match &self.behavior {
            StubBehavior::Succeed(id) => Ok(SendReceipt {
                message_id: id.clone(),
            }),
            StubBehavior::Fail(err) => Err(err.clone()),
            StubBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }

    async fn test_connection(&self) -> Result<(), TransportError> {
        match &self.behavior {
            StubBehavior::Succeed(_) => Ok(()),
            StubBehavior::Fail(err) => Err(err.clone()),
            StubBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

#[derive(Clone)]
pub struct TestState {
    pub config: Arc<Config>,
    pub mailer: Arc<Mailer<StubTransport>>,
}

impl HasMailer for TestState {
    type Transport = StubTransport;

    fn config(&self) -> &Config {
        &self.config
    }

    fn mailer(&self) -> &Arc<Mailer<Self::Transport>> {
        &self.mailer
    }
}

pub const SENDER: &str = "club@example.com";

pub fn test_config(environment: &str, with_credentials: bool) -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 3001,
        email_user: with_credentials.then(|| SENDER.to_string()),
        email_pass: with_credentials.then(|| "app-password".to_string()),
        environment: environment.to_string(),
    }
}

/// Router backed by a ready mailer; returns the captured-messages handle
pub fn ready_app(
    behavior: StubBehavior,
    environment: &str,
) -> (Router, Arc<Mutex<Vec<OutboundMessage>>>) {
    let stub = StubTransport::new(behavior);
    let sent = stub.sent.clone();
    let state = TestState {
        config: Arc::new(test_config(environment, true)),
        mailer: Arc::new(Mailer::ready(stub, SENDER)),
    };
    (build_router(state), sent)
}

/// Router backed by a mailer that failed initialization
pub fn failed_app(reason: &str, with_credentials: bool) -> Router {
    let state = TestState {
        config: Arc::new(test_config("development", with_credentials)),
        mailer: Arc::new(Mailer::failed(reason)),
    };
    build_router(state)
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

pub fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "A",
        "email": "a@b.com",
        "subject": "S",
        "message": "M"
    })
}
