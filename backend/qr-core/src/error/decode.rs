use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DecodeError {
    /// Service unreachable, connection dropped, or request timed out.
    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        timeout: bool,
        location: ErrorLocation,
    },

    /// Service answered with a non-2xx status.
    #[error("Service Error: HTTP {status} - {message} {location}")]
    Service {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    /// Service answered 2xx but the body is not the expected JSON shape.
    #[error("Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
    },

    /// The upload could not be read as an image or re-encoded for transmission.
    #[error("Image Error: {message} {location}")]
    Image {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Endpoint Error: {message} {location}")]
    InvalidEndpoint {
        message: String,
        location: ErrorLocation,
    },
}

impl DecodeError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            DecodeError::Network { .. } => true,
            DecodeError::Service { status, .. } => status.is_retryable(),
            DecodeError::Parse { .. }
            | DecodeError::Image { .. }
            | DecodeError::InvalidEndpoint { .. } => false,
        }
    }
}

impl From<reqwest::Error> for DecodeError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        DecodeError::Network {
            message: error.to_string(),
            timeout: error.is_timeout(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        DecodeError::Parse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for DecodeError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        DecodeError::InvalidEndpoint {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<image::ImageError> for DecodeError {
    #[track_caller]
    fn from(error: image::ImageError) -> Self {
        DecodeError::Image {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
