//! QR error-correction levels.

use crate::{ErrorLocation, ModelError};

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Redundancy tier of a QR symbol.
///
/// Higher levels survive more damage but hold less data for a given symbol
/// size. Recovery capacity is roughly 7% (L), 15% (M), 25% (Q) and 30% (H).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCorrectionLevel {
    L,
    M,
    Q,
    H,
}

impl Default for ErrorCorrectionLevel {
    fn default() -> Self {
        ErrorCorrectionLevel::M
    }
}

impl ErrorCorrectionLevel {
    pub const ALL: [ErrorCorrectionLevel; 4] = [
        ErrorCorrectionLevel::L,
        ErrorCorrectionLevel::M,
        ErrorCorrectionLevel::Q,
        ErrorCorrectionLevel::H,
    ];

    pub fn letter(&self) -> &'static str {
        match self {
            ErrorCorrectionLevel::L => "L",
            ErrorCorrectionLevel::M => "M",
            ErrorCorrectionLevel::Q => "Q",
            ErrorCorrectionLevel::H => "H",
        }
    }

    /// Human readable name, e.g. `Medium`.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCorrectionLevel::L => "Low",
            ErrorCorrectionLevel::M => "Medium",
            ErrorCorrectionLevel::Q => "Quartile",
            ErrorCorrectionLevel::H => "High",
        }
    }

    /// Selector label, e.g. `Medium (M)`.
    pub fn choice_label(&self) -> String {
        format!("{} ({})", self.label(), self.letter())
    }
}

impl Display for ErrorCorrectionLevel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.label())
    }
}

impl FromStr for ErrorCorrectionLevel {
    type Err = ModelError;

    /// Accepts the letter (`m`), the label (`medium`) or the selector label
    /// (`Medium (M)`), case-insensitively.
    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        Self::ALL
            .into_iter()
            .find(|level| {
                wanted.eq_ignore_ascii_case(level.letter())
                    || wanted.eq_ignore_ascii_case(level.label())
                    || wanted.eq_ignore_ascii_case(&level.choice_label())
            })
            .ok_or_else(|| ModelError::Validation {
                message: format!(
                    "Unknown error correction level '{s}' (expected one of L, M, Q, H)"
                ),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
