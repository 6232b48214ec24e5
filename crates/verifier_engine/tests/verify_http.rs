mod support;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use support::{batch, init_logging, RecordingSleeper, TestSink};
use verifier_core::VerificationStatus;
use verifier_engine::{
    ApiRoute, AttemptFailure, ClientSettings, ReqwestTransport, RetryPolicy, VerificationClient,
    VerifyError, DEFAULT_VERIFY_PATH,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ClientSettings {
    let route = ApiRoute::new(&server.uri()).unwrap();
    ClientSettings::new(route.resolve(DEFAULT_VERIFY_PATH))
}

fn client_with(settings: &ClientSettings, sleeper: &RecordingSleeper) -> VerificationClient {
    let transport = ReqwestTransport::new(settings).unwrap();
    VerificationClient::new(
        Arc::new(transport),
        Arc::new(sleeper.clone()),
        settings.retry,
    )
}

#[tokio::test]
async fn posts_batch_and_decodes_records() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .and(body_json(json!({ "emails": ["good@example.com", "bad@@nope"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "email": "good@example.com",
                "status": "Valid",
                "syntax_ok": true,
                "dns_ok": true,
                "smtp_ok": true,
                "mailbox_ok": true
            },
            {
                "email": "bad@@nope",
                "status": "Invalid",
                "reason": "Invalid syntax"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::default();
    let client = client_with(&settings_for(&server), &sleeper);
    let sink = TestSink::new();

    let records = client
        .verify(1, &batch(&["good@example.com", "bad@@nope"]), &sink)
        .await
        .expect("verify ok");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, VerificationStatus::Valid);
    assert!(records[0].mailbox_ok);
    assert_eq!(records[1].status, VerificationStatus::Invalid);
    assert_eq!(records[1].reason.as_deref(), Some("Invalid syntax"));
    assert!(sink.take().is_empty());
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn unavailable_service_gets_four_attempts() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::default();
    let client = client_with(&settings_for(&server), &sleeper);
    let sink = TestSink::new();

    let err = client
        .verify(7, &batch(&["a@x.com"]), &sink)
        .await
        .unwrap_err();

    match err {
        VerifyError::Unavailable { attempts, last } => {
            assert_eq!(attempts, 4);
            assert_eq!(last.kind, AttemptFailure::HttpStatus(503));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(sleeper.delays(), vec![Duration::from_secs(1); 3]);
    assert_eq!(sink.take().len(), 3);
}

#[tokio::test]
async fn flaky_service_succeeds_on_third_attempt() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "email": "a@x.com", "status": "Valid" }])),
        )
        .expect(1)
        .with_priority(2)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::default();
    let client = client_with(&settings_for(&server), &sleeper);

    let records = client
        .verify(3, &batch(&["a@x.com"]), &TestSink::new())
        .await
        .expect("third attempt succeeds");

    assert_eq!(records.len(), 1);
    assert_eq!(sleeper.delays().len(), 2);
}

#[tokio::test]
async fn object_body_is_invalid_response_without_retry() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "nope" })))
        .expect(1)
        .mount(&server)
        .await;

    let sleeper = RecordingSleeper::default();
    let client = client_with(&settings_for(&server), &sleeper);

    let err = client
        .verify(4, &batch(&["a@x.com"]), &TestSink::new())
        .await
        .unwrap_err();

    assert!(matches!(err, VerifyError::InvalidResponse(_)));
    assert_eq!(err.last_error().kind, AttemptFailure::NotAnArray);
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn duplicate_emails_are_rejected() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "email": "a@x.com", "status": "Valid" },
            { "email": "a@x.com", "status": "Invalid" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&settings_for(&server), &RecordingSleeper::default());

    let err = client
        .verify(5, &batch(&["a@x.com"]), &TestSink::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.last_error().kind,
        AttemptFailure::DuplicateEmail {
            email: "a@x.com".to_string()
        }
    );
}

#[tokio::test]
async fn slow_service_times_out() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.request_timeout = Duration::from_millis(200);
    settings.retry = RetryPolicy {
        max_retries: 0,
        ..RetryPolicy::default()
    };
    let client = client_with(&settings, &RecordingSleeper::default());

    let err = client
        .verify(6, &batch(&["a@x.com"]), &TestSink::new())
        .await
        .unwrap_err();

    assert!(matches!(err, VerifyError::Unavailable { attempts: 1, .. }));
    assert_eq!(err.last_error().kind, AttemptFailure::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    init_logging();
    let server = MockServer::start().await;
    let body = json!([{ "email": "someone-with-a-long-address@example.com", "status": "Valid" }]);
    Mock::given(method("POST"))
        .and(path("/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.max_response_bytes = 16;
    let client = client_with(&settings, &RecordingSleeper::default());

    let err = client
        .verify(8, &batch(&["someone-with-a-long-address@example.com"]), &TestSink::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.last_error().kind,
        AttemptFailure::TooLarge { max_bytes: 16, .. }
    ));
}
