use qr_core::error::ConfigError;

use common::ErrorLocation;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;
use std::path::PathBuf;

#[test]
fn given_read_error_when_inspected_then_preserves_io_source() {
    let err = ConfigError::ReadError {
        location: ErrorLocation::from(Location::caller()),
        path: PathBuf::from("/tmp/config.json"),
        source: IoError::new(ErrorKind::PermissionDenied, "access denied"),
    };

    let source = err.source().expect("source is kept");

    assert!(source.to_string().contains("access denied"));
    assert!(err.to_string().contains("/tmp/config.json"));
}
