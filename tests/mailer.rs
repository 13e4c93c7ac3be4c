use httpmock::prelude::*;
use reqwest::Client;
use serde_json::json;
use slap_site::config::EmailSettings;
use slap_site::mailer::{
    Mailer, OutgoingEmail, ReportTransport, RestTransport, SdkTransport, TransportError,
};
use slap_site::models::Grade;
use slap_site::report::ReportSubmission;
use std::sync::Arc;
use std::time::Duration;

fn settings(server: &MockServer) -> EmailSettings {
    EmailSettings {
        service_id: "svc_test".to_string(),
        template_id: "tpl_test".to_string(),
        public_key: "pk_test".to_string(),
        api_url: server.base_url(),
        timeout: Duration::from_secs(5),
    }
}

fn sample_email() -> OutgoingEmail {
    ReportSubmission {
        grade: Grade::Tenth,
        school: "Lincoln High".to_string(),
        principal_email: "admin@lincoln.edu".to_string(),
        anonymous: true,
        your_name: String::new(),
    }
    .compose()
}

#[tokio::test]
async fn rest_transport_posts_provider_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1.0/email/send")
                .header("content-type", "application/json")
                .body_contains(r#""service_id":"svc_test""#)
                .body_contains(r#""template_id":"tpl_test""#)
                .body_contains(r#""user_id":"pk_test""#)
                .body_contains(r#""to_email":"admin@lincoln.edu""#)
                .body_contains("Reported by: Anonymous Student Report");
            then.status(200).body("OK");
        })
        .await;

    let transport = RestTransport::new(Client::new(), settings(&server));
    transport.send(&sample_email()).await.expect("send should succeed");

    mock.assert_async().await;
}

#[tokio::test]
async fn rest_transport_reports_json_error_field() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1.0/email/send");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(json!({ "error": "The public key is invalid" }));
        })
        .await;

    let transport = RestTransport::new(Client::new(), settings(&server));
    let err = transport.send(&sample_email()).await.unwrap_err();

    match err {
        TransportError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "The public key is invalid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rest_transport_falls_back_to_raw_text_then_status() {
    let server = MockServer::start_async().await;
    let _text = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1.0/email/send")
                .body_contains("Text School");
            then.status(422).body("The template ID is invalid");
        })
        .await;
    let _empty = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1.0/email/send")
                .body_contains("Quiet School");
            then.status(503);
        })
        .await;

    let transport = RestTransport::new(Client::new(), settings(&server));

    let mut email = sample_email();
    email.params.insert("school".into(), "Text School".into());
    let err = transport.send(&email).await.unwrap_err();
    assert_eq!(err.to_string(), "The template ID is invalid");

    email.params.insert("school".into(), "Quiet School".into());
    let err = transport.send(&email).await.unwrap_err();
    assert_eq!(err.to_string(), "Email service responded with status 503");
}

#[tokio::test]
async fn sdk_transport_initializes_once_and_sends_form_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1.0/email/send-form")
                .body_contains("lib_version")
                .body_contains("pk_test")
                .body_contains("admin@lincoln.edu");
            then.status(200).body("OK");
        })
        .await;

    let transport = SdkTransport::new(Client::new(), settings(&server));
    assert!(!transport.is_initialized());

    transport.send(&sample_email()).await.expect("first send");
    assert!(transport.is_initialized());
    transport.send(&sample_email()).await.expect("second send");
    assert!(transport.is_initialized());

    assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn mailer_uses_rest_when_sdk_fails() {
    let server = MockServer::start_async().await;
    let sdk = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1.0/email/send-form");
            then.status(500).body("sdk unavailable");
        })
        .await;
    let rest = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1.0/email/send");
            then.status(200).body("OK");
        })
        .await;

    let mailer = Mailer::from_settings(&settings(&server)).expect("client");
    let delivery = mailer.deliver(&sample_email()).await.expect("fallback delivers");

    assert_eq!(delivery.route, "rest");
    assert!(delivery.fell_back);
    sdk.assert_async().await;
    rest.assert_async().await;
}

#[tokio::test]
async fn mailer_does_not_touch_fallback_when_sdk_succeeds() {
    let server = MockServer::start_async().await;
    let _sdk = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1.0/email/send-form");
            then.status(200).body("OK");
        })
        .await;
    let rest = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1.0/email/send");
            then.status(200).body("OK");
        })
        .await;

    let mailer = Mailer::from_settings(&settings(&server)).expect("client");
    let delivery = mailer.deliver(&sample_email()).await.expect("sdk delivers");

    assert_eq!(delivery.route, "sdk");
    assert!(!delivery.fell_back);
    assert_eq!(rest.hits_async().await, 0);
}

#[tokio::test]
async fn mailer_surfaces_fallback_error_when_both_fail() {
    let server = MockServer::start_async().await;
    let _sdk = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1.0/email/send-form");
            then.status(500).body("sdk unavailable");
        })
        .await;
    let _rest = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1.0/email/send");
            then.status(400)
                .json_body(json!({ "error": "The recipients address is empty" }));
        })
        .await;

    let client = Client::new();
    let settings = settings(&server);
    let mailer = Mailer::new(
        Arc::new(SdkTransport::new(client.clone(), settings.clone())),
        Arc::new(RestTransport::new(client, settings)),
    );

    let err = mailer.deliver(&sample_email()).await.unwrap_err();
    assert_eq!(err.to_string(), "The recipients address is empty");
}
