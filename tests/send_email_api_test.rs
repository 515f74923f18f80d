//! Send pipeline integration tests

use axum::http::StatusCode;
use clubmail::email::TransportError;
use common::{failed_app, post_json, ready_app, valid_submission, StubBehavior};
use pretty_assertions::assert_eq;

mod common;

#[tokio::test]
async fn test_send_email_success() {
    let (app, sent) = ready_app(StubBehavior::Succeed(Some("X".to_string())), "development");

    let (status, body) = post_json(app, "/send-email", valid_submission()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["messageId"], "X");

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, common::SENDER);
    assert_eq!(sent[0].subject, "[TSV Website] S");
}

#[tokio::test]
async fn test_missing_fields_named_in_response() {
    let (app, sent) = ready_app(StubBehavior::Succeed(None), "development");

    let (status, body) = post_json(app, "/send-email", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("name, email, subject, message"), "{message}");
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_single_missing_field() {
    let (app, _) = ready_app(StubBehavior::Succeed(None), "development");

    let mut submission = valid_submission();
    submission["message"] = serde_json::json!("");
    let (status, body) = post_json(app, "/send-email", submission).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: message");
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    for email in ["no-at-sign.com", "no.dot.after@domain", "has spaces@a.com"] {
        let (app, sent) = ready_app(StubBehavior::Succeed(None), "development");

        let mut submission = valid_submission();
        submission["email"] = serde_json::json!(email);
        let (status, body) = post_json(app, "/send-email", submission).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "email: {email}");
        assert_eq!(body["message"], "Please provide a valid email address");
        assert!(sent.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_failed_transporter_short_circuits() {
    let app = failed_app("SMTP verification failed: 535 Invalid login", true);

    let (status, body) = post_json(app, "/send-email", valid_submission()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Email service is not available. Please try again later."
    );
    // Stored failure detail is exposed in development
    assert_eq!(
        body["details"],
        "SMTP verification failed: 535 Invalid login"
    );
}

#[tokio::test(start_paused = true)]
async fn test_send_timeout_produces_bounded_response() {
    let (app, sent) = ready_app(StubBehavior::Hang, "development");

    // With a paused clock the 30s deadline elapses immediately once
    // the hanging send is the only pending task.
    let (status, body) = post_json(app, "/send-email", valid_submission()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "The email service took too long to respond. Please try again later."
    );
    assert_eq!(body["details"], "Send timed out");
    // The send was attempted; the deadline abandoned it without cancelling
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_classification() {
    let cases = [
        (
            TransportError::Auth("535-5.7.8 Invalid login".to_string()),
            "The email service rejected our credentials. Please contact the site administrator.",
        ),
        (
            TransportError::Network("Network is unreachable".to_string()),
            "Could not reach the email service. Please try again later.",
        ),
        (
            TransportError::Other("550 mailbox unavailable".to_string()),
            "Failed to send your message. Please try again later.",
        ),
    ];

    for (err, expected) in cases {
        let (app, _) = ready_app(StubBehavior::Fail(err), "development");
        let (status, body) = post_json(app, "/send-email", valid_submission()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], expected);
    }
}

#[tokio::test]
async fn test_error_details_hidden_in_production() {
    let (app, _) = ready_app(
        StubBehavior::Fail(TransportError::Auth("535 Invalid login".to_string())),
        "production",
    );

    let (status, body) = post_json(app, "/send-email", valid_submission()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("details").is_none(), "{body}");
}

#[tokio::test]
async fn test_tags_stripped_from_composed_message() {
    let (app, sent) = ready_app(StubBehavior::Succeed(None), "development");

    let mut submission = valid_submission();
    submission["phone"] = serde_json::json!("<script>");
    let (status, _) = post_json(app, "/send-email", submission).await;
    assert_eq!(status, StatusCode::OK);

    let sent = sent.lock().unwrap();
    let message = &sent[0];
    assert!(message.html_body.contains("script"));
    assert!(!message.html_body.contains("<script>"));
    assert!(message.text_body.contains("Phone: script"));
}

#[tokio::test]
async fn test_phone_row_omitted_without_phone() {
    let (app, sent) = ready_app(StubBehavior::Succeed(None), "development");

    let (status, _) = post_json(app, "/send-email", valid_submission()).await;
    assert_eq!(status, StatusCode::OK);

    let sent = sent.lock().unwrap();
    assert!(!sent[0].html_body.contains("Phone"));
    assert!(!sent[0].text_body.contains("Phone"));
}
