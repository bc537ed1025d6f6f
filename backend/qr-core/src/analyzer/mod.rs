//! Descriptive metadata about an encoded payload.

use crate::encoder::EncodedImage;

use models::AnalysisReport;

/// Version label reported by [`analyze`], independent of the real symbol.
pub const PLACEHOLDER_VERSION_LABEL: &str = "1";
/// Error-correction label reported by [`analyze`], independent of the real symbol.
pub const PLACEHOLDER_ERROR_CORRECTION_LABEL: &str = "Medium";

/// Report on `payload` alone.
///
/// `data_length` counts characters. The version and error-correction labels
/// are fixed placeholders because nothing about the encoder output is known
/// here; use [`analyze_encoded`] when the rendered image is available.
pub fn analyze(payload: &str) -> AnalysisReport {
    AnalysisReport {
        data_length: payload.chars().count(),
        version_label: PLACEHOLDER_VERSION_LABEL.to_string(),
        error_correction_label: PLACEHOLDER_ERROR_CORRECTION_LABEL.to_string(),
    }
}

/// Report on `payload` with labels taken from the symbol that was rendered.
pub fn analyze_encoded(payload: &str, image: &EncodedImage) -> AnalysisReport {
    AnalysisReport {
        data_length: payload.chars().count(),
        version_label: image.version().to_string(),
        error_correction_label: image.error_correction().label().to_string(),
    }
}
