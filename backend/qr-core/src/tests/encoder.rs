// Unit tests for the encoder's rendering geometry and failure mapping.
// Round-trip decoding through a real reader lives in integration_tests/encoder.

use crate::encoder::{BORDER_MODULES, MODULE_SIZE_PX, encode};
use crate::error::EncodeError;

use models::{Color, EncodeRequest, EncodeRequestBuilder, ErrorCorrectionLevel};

use image::Rgb;

fn request(payload: &str, level: ErrorCorrectionLevel) -> EncodeRequest {
    EncodeRequestBuilder::default()
        .with_payload(payload)
        .with_error_correction(level)
        .build()
        .unwrap()
}

/// **VALUE**: Verifies the fixed 10 px module size and 4-module border.
///
/// **WHY THIS MATTERS**: Downstream readers and the download size both depend
/// on the raster geometry. A short payload fits version 1 (21 modules), so the
/// image must be (21 + 8) * 10 = 290 px square.
///
/// **BUG THIS CATCHES**: Would catch the border being applied on one side only,
/// or the module size drifting from 10 px.
#[test]
fn given_short_payload_when_encoding_then_version_one_at_fixed_geometry() {
    // GIVEN: A payload that fits version 1 at level L
    let req = request("HELLO", ErrorCorrectionLevel::L);

    // WHEN: Encoding
    let encoded = encode(&req).unwrap();

    // THEN: Version 1, 21 modules, 290px square
    assert_eq!(encoded.version(), 1);
    assert_eq!(encoded.modules(), 21);
    assert_eq!(encoded.side_px(), (21 + 2 * BORDER_MODULES) * MODULE_SIZE_PX);
    assert_eq!(encoded.image().width(), encoded.image().height());
}

#[test]
fn given_custom_colors_when_encoding_then_border_uses_background_and_finder_uses_foreground() {
    let fg = Color::new(0x20, 0x30, 0x80);
    let bg = Color::new(0xF0, 0xE0, 0xD0);
    let req = EncodeRequestBuilder::default()
        .with_payload("colors")
        .with_foreground(fg)
        .with_background(bg)
        .build()
        .unwrap();

    let encoded = encode(&req).unwrap();
    let image = encoded.image();

    // Top-left pixel sits in the quiet zone.
    assert_eq!(*image.get_pixel(0, 0), Rgb(bg.to_array()));

    // First module after the border is the finder pattern's dark corner.
    let origin = BORDER_MODULES * MODULE_SIZE_PX;
    assert_eq!(*image.get_pixel(origin, origin), Rgb(fg.to_array()));
    assert_eq!(
        *image.get_pixel(origin + MODULE_SIZE_PX - 1, origin + MODULE_SIZE_PX - 1),
        Rgb(fg.to_array())
    );

    // Only the two requested colors appear.
    assert!(
        image
            .pixels()
            .all(|p| *p == Rgb(fg.to_array()) || *p == Rgb(bg.to_array()))
    );
}

/// **VALUE**: Verifies higher error correction never picks a smaller symbol.
///
/// **WHY THIS MATTERS**: More redundancy costs capacity; the automatic version
/// choice must account for the requested level rather than always using M.
///
/// **BUG THIS CATCHES**: Would catch the level being ignored when mapping onto
/// the QR library.
#[test]
fn given_same_payload_when_raising_error_correction_then_version_never_shrinks() {
    let payload = "https://example.com/some/longer/path?with=query&and=more";

    let versions: Vec<i16> = ErrorCorrectionLevel::ALL
        .into_iter()
        .map(|level| encode(&request(payload, level)).unwrap().version())
        .collect();

    assert!(versions.windows(2).all(|w| w[0] <= w[1]), "{versions:?}");
    assert!(versions[3] > versions[0], "H should need a larger symbol than L");
}

#[test]
fn given_level_when_encoding_then_image_records_requested_level() {
    let encoded = encode(&request("level", ErrorCorrectionLevel::Q)).unwrap();

    assert_eq!(encoded.error_correction(), ErrorCorrectionLevel::Q);
}

/// **VALUE**: Verifies oversize payloads fail with a capacity error.
///
/// **BUG THIS CATCHES**: Would catch `QrError::DataTooLong` being mapped to a
/// generic symbol error, which would hide the actionable cause from users.
#[test]
fn given_payload_beyond_capacity_when_encoding_then_returns_capacity_error() {
    // Version 40-H holds 1273 bytes.
    let payload = "x".repeat(1300);

    let result = encode(&request(&payload, ErrorCorrectionLevel::H));

    assert!(matches!(result, Err(EncodeError::Capacity { .. })));
}

#[test]
fn given_encoded_image_when_serialized_then_emits_png_signature() {
    let encoded = encode(&request("png", ErrorCorrectionLevel::M)).unwrap();

    let png = encoded.to_png().unwrap();

    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), encoded.image().dimensions());
}
