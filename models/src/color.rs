//! RGB colors as produced by a hex color picker.

use crate::{ErrorLocation, ModelError};

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const HEX_COLOR_PATTERN: &str = r"^#?(?P<hex>[0-9a-fA-F]{6})$";
const HEX_CAPTURE: &str = "hex";

static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn hex_color_regex() -> &'static Regex {
    HEX_COLOR_REGEX.get_or_init(|| Regex::new(HEX_COLOR_PATTERN).expect("valid regex pattern"))
}

/// An sRGB color with 8 bits per channel.
///
/// Parses from `#RRGGBB` (the `#` is optional, digits are case-insensitive)
/// and always formats back as upper-case `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse a `#RRGGBB` hex string.
    #[track_caller]
    pub fn from_hex(input: &str) -> Result<Self, ModelError> {
        let trimmed = input.trim();

        let hex = hex_color_regex()
            .captures(trimmed)
            .and_then(|cap| cap.name(HEX_CAPTURE))
            .ok_or_else(|| ModelError::Validation {
                message: format!("Invalid color '{input}': expected #RRGGBB"),
                location: ErrorLocation::from(Location::caller()),
            })?
            .as_str();

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| ModelError::Validation {
                message: format!("Invalid color '{input}': {e}"),
                location: ErrorLocation::from(Location::caller()),
            })
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Display for Color {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ModelError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ModelError;

    #[track_caller]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
