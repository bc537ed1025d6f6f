use crate::error::model_error::ModelError;
use crate::{Color, EncodeRequest, ErrorCorrectionLevel, ErrorLocation};

use std::panic::Location;

/// Builder for creating validated EncodeRequest instances.
///
/// Colors default to black on white and the error-correction level to
/// Medium. The payload is required and must be non-empty.
#[derive(Debug, Default)]
pub struct EncodeRequestBuilder {
    payload: Option<String>,
    foreground: Option<Color>,
    background: Option<Color>,
    error_correction: Option<ErrorCorrectionLevel>,
}

impl EncodeRequestBuilder {
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_error_correction(mut self, level: ErrorCorrectionLevel) -> Self {
        self.error_correction = Some(level);
        self
    }

    /// Build the EncodeRequest with validation.
    #[track_caller]
    pub fn build(self) -> Result<EncodeRequest, ModelError> {
        let payload = self.payload.ok_or_else(|| ModelError::Validation {
            message: String::from("Payload is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if payload.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Payload cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(EncodeRequest {
            payload,
            foreground: self.foreground.unwrap_or(Color::BLACK),
            background: self.background.unwrap_or(Color::WHITE),
            error_correction: self.error_correction.unwrap_or_default(),
        })
    }
}
