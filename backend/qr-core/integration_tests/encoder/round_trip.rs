use crate::helpers::read_symbols;

use qr_core::{analyze, encode};

use models::{Color, EncodeRequestBuilder, ErrorCorrectionLevel};

use proptest::prelude::*;

/// **VALUE**: The concrete round trip users hit most often.
///
/// **WHY THIS MATTERS**: A URL at Medium, black on white, is the default
/// configuration. The PNG must be valid and read back exactly.
#[test]
fn given_example_url_when_encoded_as_png_then_reads_back_exactly() {
    // GIVEN: The default configuration
    let payload = "https://example.com";
    let request = EncodeRequestBuilder::default()
        .with_payload(payload)
        .with_foreground(Color::from_hex("#000000").unwrap())
        .with_background(Color::from_hex("#FFFFFF").unwrap())
        .with_error_correction(ErrorCorrectionLevel::M)
        .build()
        .unwrap();

    // WHEN: Encoding and serializing as PNG
    let png = encode(&request).unwrap().to_png().unwrap();

    // THEN: The PNG decodes to an image carrying exactly the payload
    let image = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .unwrap()
        .to_rgb8();
    assert_eq!(read_symbols(&image), [payload]);

    // AND: The analysis counts its 19 characters
    assert_eq!(analyze(payload).data_length, 19);
}

fn level() -> impl Strategy<Value = ErrorCorrectionLevel> {
    prop_oneof![
        Just(ErrorCorrectionLevel::L),
        Just(ErrorCorrectionLevel::M),
        Just(ErrorCorrectionLevel::Q),
        Just(ErrorCorrectionLevel::H),
    ]
}

fn dark() -> impl Strategy<Value = Color> {
    (0u8..=80, 0u8..=80, 0u8..=80).prop_map(|(r, g, b)| Color::new(r, g, b))
}

fn light() -> impl Strategy<Value = Color> {
    (190u8..=255, 190u8..=255, 190u8..=255).prop_map(|(r, g, b)| Color::new(r, g, b))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn proptest_encoded_payload_reads_back(
        payload in "[ -~]{1,120}",
        level in level(),
        fg in dark(),
        bg in light(),
    ) {
        let request = EncodeRequestBuilder::default()
            .with_payload(payload.clone())
            .with_foreground(fg)
            .with_background(bg)
            .with_error_correction(level)
            .build()
            .unwrap();

        let encoded = encode(&request).unwrap();

        prop_assert_eq!(read_symbols(encoded.image()), vec![payload]);
    }
}
