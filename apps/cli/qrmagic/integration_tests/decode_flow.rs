use qrmagic::commands::decode::{DecodeOutcome, NOTHING_FOUND_WARNING, decode_file, decode_upload};
use qrmagic::commands::generate::{GenerateForm, generate_qr};
use qrmagic::error::QrMagicError;

use qr_core::config::{AppConfig, GeneratorDefaults};
use qr_core::QrServerClient;

use common::HttpStatusCode;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const READ_PATH: &str = "/v1/read-qr-code/";

fn client_for(server: &MockServer) -> QrServerClient {
    let mut config = AppConfig::default();
    config.decoder.endpoint = format!("{}{READ_PATH}", server.uri());
    config.decoder.timeout_secs = 5;
    config.decoder.initial_backoff_ms = 10;
    QrServerClient::new(&config.decoder.endpoint, config.decoder.settings()).unwrap()
}

fn qr_png(text: &str) -> Vec<u8> {
    let form = GenerateForm::with_defaults(text, &GeneratorDefaults::default());
    generate_qr(&form).unwrap().png
}

/// **VALUE**: Tests the decode command path from a file on disk.
///
/// **WHY THIS MATTERS**: Generated files are fed back through the decoder; the
/// first payload reported by the service is what the user sees.
#[tokio::test]
async fn given_generated_png_on_disk_when_decoding_file_then_surfaces_first_payload() {
    // GIVEN: A generated PNG saved to disk and a service reporting two symbols
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("QRCode.png");
    std::fs::write(&file, qr_png("https://example.com")).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "qrcode", "symbol": [
                {"seq": 0, "data": "https://example.com", "error": null},
                {"seq": 1, "data": "second", "error": null}
            ]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Decoding the file
    let outcome = decode_file(&client_for(&server), &file).await.unwrap();

    // THEN: Only the first payload is surfaced, but both are kept
    assert_eq!(outcome.surfaced(), Some("https://example.com"));
    match outcome {
        DecodeOutcome::Decoded(symbols) => assert_eq!(symbols.len(), 2),
        DecodeOutcome::NothingFound => panic!("expected payloads"),
    }
}

#[tokio::test]
async fn given_service_finds_nothing_when_decoding_then_nothing_found_warning() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": "qrcode", "symbol": [
                {"seq": 0, "data": null, "error": "could not find/read QR Code"}
            ]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = decode_upload(&client_for(&server), "photo.jpg", &qr_png("anything"))
        .await
        .unwrap();

    assert!(outcome.is_warning());
    assert_eq!(outcome.message(), NOTHING_FOUND_WARNING);
}

/// **VALUE**: Verifies an unsupported upload never reaches the service.
///
/// **BUG THIS CATCHES**: Would catch the extension check running after the
/// network call.
#[tokio::test]
async fn given_gif_upload_when_decoding_then_rejected_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = decode_upload(&client_for(&server), "animation.gif", &qr_png("gif")).await;

    match result {
        Err(err @ QrMagicError::InputValidation { .. }) => assert!(err.is_warning()),
        other => panic!("Expected InputValidation, got {other:?}"),
    }
}

#[tokio::test]
async fn given_service_outage_when_decoding_then_returns_service_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let result = decode_upload(&client_for(&server), "code.png", &qr_png("outage")).await;

    match result {
        Err(err @ QrMagicError::Service { .. }) => {
            assert!(!err.is_warning());
            assert!(matches!(
                err,
                QrMagicError::Service {
                    status: HttpStatusCode(503),
                    ..
                }
            ));
        }
        other => panic!("Expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_corrupt_png_when_decoding_then_input_validation_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let result = decode_upload(&client_for(&server), "broken.png", b"\x89PNG but not really").await;

    assert!(matches!(result, Err(QrMagicError::InputValidation { .. })));
}
