pub mod builder;

use crate::{Color, ErrorCorrectionLevel};

/// Everything the encoder needs to render one QR image.
///
/// Only constructible through [`builder::EncodeRequestBuilder`], which
/// guarantees a non-empty payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    pub(crate) payload: String,
    pub(crate) foreground: Color,
    pub(crate) background: Color,
    pub(crate) error_correction: ErrorCorrectionLevel,
}

impl EncodeRequest {
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn error_correction(&self) -> ErrorCorrectionLevel {
        self.error_correction
    }
}
