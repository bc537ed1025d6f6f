use crate::{Color, EncodeRequestBuilder, ErrorCorrectionLevel, ModelError};

/// **VALUE**: Verifies that an empty payload never reaches the encoder.
///
/// **WHY THIS MATTERS**: Encoding an empty string produces a valid but useless
/// symbol. The user must get a warning instead.
///
/// **BUG THIS CATCHES**: Would catch if the emptiness check is removed from
/// `build()` during refactoring.
#[test]
fn given_empty_payload_when_building_then_returns_validation_error() {
    // GIVEN: Builder with an empty payload
    let builder = EncodeRequestBuilder::default().with_payload("");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Payload cannot be empty");
        }
        Ok(request) => panic!("Expected validation error, got {request:?}"),
    }
}

#[test]
fn given_missing_payload_when_building_then_returns_validation_error() {
    let result = EncodeRequestBuilder::default()
        .with_error_correction(ErrorCorrectionLevel::H)
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Payload is required");
        }
        Ok(request) => panic!("Expected validation error, got {request:?}"),
    }
}

#[test]
fn given_only_payload_when_building_then_applies_defaults() {
    let request = EncodeRequestBuilder::default()
        .with_payload("hello")
        .build()
        .unwrap();

    assert_eq!(request.payload(), "hello");
    assert_eq!(request.foreground(), Color::BLACK);
    assert_eq!(request.background(), Color::WHITE);
    assert_eq!(request.error_correction(), ErrorCorrectionLevel::M);
}

#[test]
fn given_all_fields_when_building_then_keeps_them() {
    let fg = Color::new(10, 20, 30);
    let bg = Color::new(250, 240, 230);

    let request = EncodeRequestBuilder::default()
        .with_payload("https://example.com")
        .with_foreground(fg)
        .with_background(bg)
        .with_error_correction(ErrorCorrectionLevel::Q)
        .build()
        .unwrap();

    assert_eq!(request.foreground(), fg);
    assert_eq!(request.background(), bg);
    assert_eq!(request.error_correction(), ErrorCorrectionLevel::Q);
}

#[test]
fn given_whitespace_payload_when_building_then_accepts_it() {
    // Whitespace is a legitimate payload; only the empty string is rejected.
    let request = EncodeRequestBuilder::default().with_payload(" ").build();

    assert!(request.is_ok());
}
