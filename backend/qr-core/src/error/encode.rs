use common::ErrorLocation;

use std::panic::Location;

use qrcode::types::QrError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum EncodeError {
    /// Payload does not fit in the largest symbol at the requested level.
    #[error("Capacity Error: {message} {location}")]
    Capacity {
        message: String,
        location: ErrorLocation,
    },

    #[error("Symbol Error: {message} {location}")]
    Symbol {
        message: String,
        location: ErrorLocation,
    },

    #[error("PNG Error: {message} {location}")]
    Png {
        message: String,
        location: ErrorLocation,
    },
}

impl From<QrError> for EncodeError {
    #[track_caller]
    fn from(error: QrError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            QrError::DataTooLong => EncodeError::Capacity {
                message: error.to_string(),
                location,
            },
            other => EncodeError::Symbol {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<image::ImageError> for EncodeError {
    #[track_caller]
    fn from(error: image::ImageError) -> Self {
        EncodeError::Png {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
