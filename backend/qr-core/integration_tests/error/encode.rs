use qr_core::error::EncodeError;

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies encode errors carry their origin.
///
/// **BUG THIS CATCHES**: Would catch the Display format losing the location
/// suffix, which is the only pointer back to the failing call site in logs.
#[test]
#[track_caller]
fn given_capacity_error_when_formatted_then_includes_kind_and_location() {
    let err = EncodeError::Capacity {
        message: "data too long".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let text = err.to_string();

    assert!(text.contains("Capacity Error"));
    assert!(text.contains("data too long"));
    assert!(text.contains("encode.rs"));
}
