use crate::helpers::{
    PngUpload, READ_PATH, client_for, encode_text, fast_settings, found, not_found, side_by_side,
};

use qr_core::DecodeRequest;
use qr_core::error::DecodeError;

use models::ErrorCorrectionLevel;

use image::DynamicImage;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the happy path end to end against a simulated service.
///
/// **WHY THIS MATTERS**: This is the whole decode contract: PNG in a multipart
/// `file` field, JSON array back, first payload surfaced.
///
/// **BUG THIS CATCHES**: Would catch a renamed form field, a missing file name,
/// a non-PNG upload, or the response parser picking the wrong field.
#[tokio::test]
async fn given_qr_image_when_decoding_then_posts_png_and_returns_payload() {
    // GIVEN: A service that expects a PNG upload and answers with one symbol
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .and(PngUpload)
        .respond_with(ResponseTemplate::new(200).set_body_json(found(&["https://example.com"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_settings(0));
    let encoded = encode_text("https://example.com", ErrorCorrectionLevel::M);

    // WHEN: Decoding
    let symbols = client.decode(&DecodeRequest::from(&encoded)).await.unwrap();

    // THEN: The single payload comes back
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols.first(), Some("https://example.com"));
}

/// **VALUE**: Verifies "no symbol" is an empty result, not an error.
///
/// **BUG THIS CATCHES**: Would catch the service's `data: null` answer being
/// reported as a parse failure or as a bogus empty-string payload.
#[tokio::test]
async fn given_image_without_symbol_when_decoding_then_returns_empty_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_found()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_settings(1));
    let blank = DynamicImage::new_rgb8(64, 64);

    let symbols = client
        .decode(&DecodeRequest::from_image(blank))
        .await
        .unwrap();

    assert!(symbols.is_empty());
    assert_eq!(symbols.first(), None);
}

/// **VALUE**: Verifies an image with two symbols yields both payloads in order.
///
/// **WHY THIS MATTERS**: Only index 0 is shown to the user, but the full
/// sequence must survive so callers can choose otherwise.
#[tokio::test]
async fn given_image_with_two_symbols_when_decoding_then_returns_both_in_order() {
    // GIVEN: A real two-symbol image, readable locally
    let left = encode_text("left symbol", ErrorCorrectionLevel::M);
    let right = encode_text("right symbol", ErrorCorrectionLevel::M);
    let canvas = side_by_side(&left, &right);

    let mut local = crate::helpers::read_symbols(&canvas);
    local.sort();
    assert_eq!(local, ["left symbol", "right symbol"]);

    // AND: A service reporting both
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .and(PngUpload)
        .respond_with(
            ResponseTemplate::new(200).set_body_json(found(&["left symbol", "right symbol"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_settings(0));

    // WHEN: Decoding the uploaded canvas
    let symbols = client
        .decode(&DecodeRequest::from_image(DynamicImage::ImageRgb8(canvas)))
        .await
        .unwrap();

    // THEN: Two payloads, first one surfaced
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols.first(), Some("left symbol"));
}

#[tokio::test]
async fn given_uploaded_jpeg_bytes_when_decoding_then_normalizes_to_png() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .and(PngUpload)
        .respond_with(ResponseTemplate::new(200).set_body_json(found(&["jpeg"])))
        .expect(1)
        .mount(&server)
        .await;

    let encoded = encode_text("jpeg", ErrorCorrectionLevel::H);
    let mut jpeg = Vec::new();
    DynamicImage::ImageRgb8(encoded.image().clone())
        .write_to(
            &mut std::io::Cursor::new(&mut jpeg),
            image::ImageFormat::Jpeg,
        )
        .unwrap();

    let request = DecodeRequest::from_bytes(&jpeg).unwrap();
    let symbols = client_for(&server, fast_settings(0))
        .decode(&request)
        .await
        .unwrap();

    assert_eq!(symbols.first(), Some("jpeg"));
}

#[test]
fn given_garbage_upload_when_building_request_then_returns_image_error() {
    let result = DecodeRequest::from_bytes(b"definitely not an image");

    assert!(matches!(result, Err(DecodeError::Image { .. })));
}

#[tokio::test]
async fn given_malformed_success_body_when_decoding_then_returns_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(READ_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_settings(3));
    let encoded = encode_text("parse", ErrorCorrectionLevel::M);

    let result = client.decode(&DecodeRequest::from(&encoded)).await;

    assert!(matches!(result, Err(DecodeError::Parse { .. })));
}
