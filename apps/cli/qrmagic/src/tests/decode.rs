use crate::commands::decode::{
    DecodeOutcome, NOTHING_FOUND_WARNING, check_upload_name, decode_file,
};
use crate::error::QrMagicError;

use models::DecodedSymbols;
use qr_core::{DecoderSettings, QrServerClient};

use std::path::Path;

/// Client for a local port. Tests using it must fail before any request.
fn offline_client() -> QrServerClient {
    QrServerClient::new("http://127.0.0.1:9/v1/read-qr-code/", DecoderSettings::default()).unwrap()
}

#[test]
fn given_allowed_extensions_when_checking_upload_then_accepts_any_case() {
    for name in ["a.png", "b.jpg", "c.jpeg", "D.PNG", "e.JpEg", "dir/f.png"] {
        assert!(check_upload_name(name).is_ok(), "{name}");
    }
}

/// **VALUE**: Verifies the upload filter matches the png/jpg/jpeg control.
///
/// **BUG THIS CATCHES**: Would catch gif/webp or extension-less files being
/// sent to the service, which wastes a round trip on an error.
#[test]
fn given_other_extensions_when_checking_upload_then_rejects() {
    for name in ["a.gif", "b.webp", "c", "png", "d.png.txt", ""] {
        let result = check_upload_name(name);

        assert!(
            matches!(result, Err(QrMagicError::InputValidation { .. })),
            "{name} should be rejected"
        );
    }
}

#[test]
fn given_two_symbols_when_building_outcome_then_surfaces_first_only() {
    let symbols = DecodedSymbols::new(vec!["one".to_string(), "two".to_string()]);

    let outcome = DecodeOutcome::from(symbols);

    assert_eq!(outcome.surfaced(), Some("one"));
    assert_eq!(outcome.message(), "Decoded Data: one");
    assert!(!outcome.is_warning());
}

#[test]
fn given_no_symbols_when_building_outcome_then_nothing_found_warning() {
    let outcome = DecodeOutcome::from(DecodedSymbols::default());

    assert_eq!(outcome, DecodeOutcome::NothingFound);
    assert!(outcome.is_warning());
    assert_eq!(outcome.message(), NOTHING_FOUND_WARNING);
}

/// **VALUE**: Verifies `decode_file` rejects by extension before touching disk.
///
/// **BUG THIS CATCHES**: Would catch the extension check being skipped or moved
/// after the read, which turns "unsupported upload" into a confusing I/O error.
#[tokio::test]
async fn given_missing_gif_when_decoding_file_then_rejected_by_extension() {
    // GIVEN: A path with an unsupported extension that does not exist
    let path = Path::new("/nonexistent/animation.gif");

    // WHEN: Decoding it
    let result = decode_file(&offline_client(), path).await;

    // THEN: The extension check answers, not the file read
    match result {
        Err(QrMagicError::InputValidation { message, .. }) => {
            assert!(message.starts_with("Unsupported upload"), "{message}");
        }
        other => panic!("Expected InputValidation, got {other:?}"),
    }
}

#[tokio::test]
async fn given_missing_png_when_decoding_file_then_reports_read_failure() {
    let path = Path::new("/nonexistent/code.png");

    let result = decode_file(&offline_client(), path).await;

    match result {
        Err(QrMagicError::InputValidation { message, .. }) => {
            assert!(message.starts_with("Failed to read"), "{message}");
        }
        other => panic!("Expected InputValidation, got {other:?}"),
    }
}
