// Retry and timeout behavior of the decoder client.
// Mock expectations are verified when each MockServer is dropped, so the
// `.expect(n)` calls below assert the exact number of attempts.

use crate::helpers::{
    READ_PATH, client_for, encode_text, fast_settings, found, truncated_body_endpoint,
    unreachable_endpoint,
};

use qr_core::error::DecodeError;
use qr_core::{DecodeRequest, DecoderSettings, QrServerClient, RetryPolicy};

use common::HttpStatusCode;
use models::ErrorCorrectionLevel;

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> DecodeRequest {
    DecodeRequest::from(&encode_text("retry", ErrorCorrectionLevel::M))
}

/// **VALUE**: Verifies a non-2xx answer surfaces as a Service error with its status.
///
/// **WHY THIS MATTERS**: Users must be able to tell "the service rejected the
/// image" apart from "the service could not be reached".
///
/// **BUG THIS CATCHES**: Would catch every failure collapsing into one generic
/// decode error, or a 400 being retried.
#[tokio::test]
async fn given_client_error_status_when_decoding_then_returns_service_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad upload"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server, fast_settings(1)).decode(&request()).await;

    match result {
        Err(DecodeError::Service {
            status, message, ..
        }) => {
            assert_eq!(status, HttpStatusCode(400));
            assert_eq!(message, "bad upload");
        }
        other => panic!("Expected Service error, got {other:?}"),
    }
}

/// **VALUE**: Verifies an error status still surfaces when its body is unreadable.
///
/// **BUG THIS CATCHES**: Would catch a failed body read replacing the Service
/// error (and its status) with a Network error.
#[tokio::test]
async fn given_error_status_with_truncated_body_when_decoding_then_returns_service_error() {
    // GIVEN: A service that answers 400 and drops the connection mid-body
    let client = QrServerClient::new(&truncated_body_endpoint(400), fast_settings(0)).unwrap();

    // WHEN: Decoding
    let result = client.decode(&request()).await;

    // THEN: The status is kept and the unreadable body becomes an empty message
    match result {
        Err(DecodeError::Service {
            status, message, ..
        }) => {
            assert_eq!(status, HttpStatusCode(400));
            assert!(message.is_empty(), "unexpected message {message:?}");
        }
        other => panic!("Expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_unreachable_service_when_decoding_then_returns_network_error() {
    let client = QrServerClient::new(&unreachable_endpoint(), fast_settings(1)).unwrap();

    let result = client.decode(&request()).await;

    match result {
        Err(DecodeError::Network { timeout, .. }) => assert!(!timeout),
        other => panic!("Expected Network error, got {other:?}"),
    }
}

/// **VALUE**: Verifies the single retry is spent on a transient 503 and no more.
///
/// **BUG THIS CATCHES**: Would catch an unbounded retry loop, or the retry
/// bound being off by one.
#[tokio::test]
async fn given_persistent_unavailable_when_decoding_then_retries_once_and_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let result = client_for(&server, fast_settings(1)).decode(&request()).await;

    match result {
        Err(DecodeError::Service { status, .. }) => assert_eq!(status, HttpStatusCode(503)),
        other => panic!("Expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_transient_failure_then_success_when_decoding_then_returns_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(found(&["retry"])))
        .expect(1)
        .mount(&server)
        .await;

    let symbols = client_for(&server, fast_settings(1))
        .decode(&request())
        .await
        .unwrap();

    assert_eq!(symbols.first(), Some("retry"));
}

/// **VALUE**: Verifies a hung service cannot block the caller indefinitely.
///
/// **WHY THIS MATTERS**: Without a timeout the decode call waits forever on a
/// stalled connection.
///
/// **BUG THIS CATCHES**: Would catch the client timeout being dropped from the
/// reqwest builder, or timeouts not being flagged as such.
#[tokio::test]
async fn given_slow_service_when_decoding_then_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(found(&["too late"]))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let settings = DecoderSettings {
        timeout: Duration::from_millis(200),
        retry: RetryPolicy {
            max_retries: 1,
            initial_backoff: Duration::from_millis(10),
        },
    };

    let result = client_for(&server, settings).decode(&request()).await;

    match result {
        Err(DecodeError::Network { timeout, .. }) => assert!(timeout),
        other => panic!("Expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn given_no_retry_policy_when_service_unavailable_then_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let settings = DecoderSettings {
        retry: RetryPolicy::none(),
        ..DecoderSettings::default()
    };

    let result = client_for(&server, settings).decode(&request()).await;

    assert!(matches!(result, Err(DecodeError::Service { .. })));
}

#[test]
fn given_non_http_endpoint_when_creating_client_then_returns_invalid_endpoint() {
    for endpoint in ["not a url", "ftp://example.com/read"] {
        let result = QrServerClient::new(endpoint, DecoderSettings::default());

        assert!(
            matches!(result, Err(DecodeError::InvalidEndpoint { .. })),
            "{endpoint}"
        );
    }
}

#[test]
fn given_public_client_when_created_then_targets_qrserver() {
    let client = QrServerClient::public().unwrap();

    assert_eq!(
        client.endpoint().as_str(),
        "https://api.qrserver.com/v1/read-qr-code/"
    );
}
