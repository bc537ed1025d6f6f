use crate::error::QrMagicError;

use common::{ErrorLocation, HttpStatusCode};
use models::ModelError;
use qr_core::error::DecodeError;

use std::panic::Location;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

/// **VALUE**: Verifies each decode failure keeps its own kind in the front end.
///
/// **WHY THIS MATTERS**: Users should learn whether the service was down,
/// refused the image, or answered nonsense, instead of one generic message.
///
/// **BUG THIS CATCHES**: Would catch the conversion collapsing variants.
#[test]
fn given_decode_errors_when_converted_then_taxonomy_is_preserved() {
    let network: QrMagicError = DecodeError::Network {
        message: "refused".into(),
        timeout: false,
        location: here(),
    }
    .into();
    let timeout: QrMagicError = DecodeError::Network {
        message: "timed out".into(),
        timeout: true,
        location: here(),
    }
    .into();
    let service: QrMagicError = DecodeError::Service {
        status: HttpStatusCode(500),
        message: "boom".into(),
        location: here(),
    }
    .into();
    let parse: QrMagicError = DecodeError::Parse {
        message: "eof".into(),
        location: here(),
    }
    .into();
    let image: QrMagicError = DecodeError::Image {
        message: "bad header".into(),
        location: here(),
    }
    .into();

    assert!(matches!(network, QrMagicError::Network { timeout: false, .. }));
    assert!(matches!(timeout, QrMagicError::Network { timeout: true, .. }));
    assert!(matches!(service, QrMagicError::Service { status: HttpStatusCode(500), .. }));
    assert!(matches!(parse, QrMagicError::Parse { .. }));
    assert!(matches!(image, QrMagicError::InputValidation { .. }));

    let messages = [
        network.user_message(),
        timeout.user_message(),
        service.user_message(),
        parse.user_message(),
    ];
    for (i, a) in messages.iter().enumerate() {
        for b in &messages[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(service.user_message().contains("HTTP 500"));
}

#[test]
fn given_model_validation_error_when_converted_then_is_soft_warning() {
    let err: QrMagicError = ModelError::Validation {
        message: "Payload cannot be empty".into(),
        location: here(),
    }
    .into();

    assert!(err.is_warning());
    assert_eq!(err.user_message(), "Payload cannot be empty");
}

#[test]
fn given_error_when_serialized_then_tagged_with_variant() {
    let err = QrMagicError::Parse {
        message: "eof".into(),
        location: here(),
    };

    let json = serde_json::to_value(&err).unwrap();

    assert_eq!(json["type"], "Parse");
    assert_eq!(json["data"]["message"], "eof");
}
