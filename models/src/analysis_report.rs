use serde::{Deserialize, Serialize};

/// Descriptive metadata about an encoded payload.
///
/// Serializes with the display keys shown to users
/// (`"Data Length"`, `"Version"`, `"Error Correction Level"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(rename = "Data Length")]
    pub data_length: usize,
    #[serde(rename = "Version")]
    pub version_label: String,
    #[serde(rename = "Error Correction Level")]
    pub error_correction_label: String,
}
