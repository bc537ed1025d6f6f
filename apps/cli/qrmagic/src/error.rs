use common::{ErrorLocation, HttpStatusCode};
use models::ModelError;
use qr_core::error::{ConfigError, DecodeError, EncodeError};

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the front end.
///
/// Each decode failure kind keeps its own variant so the user sees why a
/// decode failed, not just that it did.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum QrMagicError {
    /// Rejected user input (empty text, bad color, unsupported upload).
    #[error("Input Validation Error: {message} {location}")]
    InputValidation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Encoding Error: {message} {location}")]
    Encoding {
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        timeout: bool,
        location: ErrorLocation,
    },

    #[error("Service Error: HTTP {status} - {message} {location}")]
    Service {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Local failures: file I/O, logger setup, missing directories.
    #[error("QRMagic Error: {message} {location}")]
    QrMagic {
        message: String,
        location: ErrorLocation,
    },
}

impl QrMagicError {
    /// Whether this should be shown as a soft warning rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, QrMagicError::InputValidation { .. })
    }

    /// Short text for the user, without the source location.
    pub fn user_message(&self) -> String {
        match self {
            QrMagicError::InputValidation { message, .. } => message.clone(),
            QrMagicError::Encoding { message, .. } => {
                format!("Could not generate the QR code: {message}")
            }
            QrMagicError::Network { timeout: true, .. } => {
                String::from("The QR decoding service did not respond in time.")
            }
            QrMagicError::Network { .. } => {
                String::from("Could not reach the QR decoding service.")
            }
            QrMagicError::Service { status, .. } => {
                format!("The QR decoding service rejected the request (HTTP {status}).")
            }
            QrMagicError::Parse { .. } => {
                String::from("The QR decoding service returned an unreadable response.")
            }
            QrMagicError::Config { message, .. } | QrMagicError::QrMagic { message, .. } => {
                message.clone()
            }
        }
    }
}

impl From<ModelError> for QrMagicError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::Validation { message, .. } => QrMagicError::InputValidation {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<EncodeError> for QrMagicError {
    #[track_caller]
    fn from(error: EncodeError) -> Self {
        QrMagicError::Encoding {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DecodeError> for QrMagicError {
    #[track_caller]
    fn from(error: DecodeError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            DecodeError::Network {
                message, timeout, ..
            } => QrMagicError::Network {
                message,
                timeout,
                location,
            },
            DecodeError::Service {
                status, message, ..
            } => QrMagicError::Service {
                status,
                message,
                location,
            },
            DecodeError::Parse { message, .. } => QrMagicError::Parse { message, location },
            DecodeError::Image { message, .. } => {
                QrMagicError::InputValidation { message, location }
            }
            DecodeError::InvalidEndpoint { message, .. } => {
                QrMagicError::Config { message, location }
            }
        }
    }
}

impl From<ConfigError> for QrMagicError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        QrMagicError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
