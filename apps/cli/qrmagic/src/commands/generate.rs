use crate::error::QrMagicError;

use common::ErrorLocation;
use models::{AnalysisReport, Color, EncodeRequestBuilder, ErrorCorrectionLevel};
use qr_core::config::{
    DEFAULT_FILE_NAME, GeneratorDefaults, PREVIEW_SIZE_MAX, PREVIEW_SIZE_MIN, PREVIEW_SIZE_STEP,
};
use qr_core::{analyze_encoded, encode};

use std::ffi::OsStr;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info};

pub const EMPTY_INPUT_WARNING: &str = "Please enter text or URL to generate a QR code.";
const PNG_EXTENSION: &str = ".png";
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Values of the generator controls for one click of "generate".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateForm {
    pub text: String,
    pub foreground: Color,
    pub background: Color,
    pub error_correction: ErrorCorrectionLevel,
    pub preview_size: u32,
    pub file_name: Option<String>,
}

impl GenerateForm {
    /// A form holding `text` and every other control at its configured default.
    pub fn with_defaults(text: impl Into<String>, defaults: &GeneratorDefaults) -> Self {
        Self {
            text: text.into(),
            foreground: defaults.foreground,
            background: defaults.background,
            error_correction: defaults.error_correction,
            preview_size: defaults.preview_size,
            file_name: Some(defaults.file_name.clone()),
        }
    }
}

/// A rendered QR code ready to show and download.
#[derive(Debug, Clone)]
pub struct GeneratedQr {
    pub png: Vec<u8>,
    pub file_name: String,
    pub preview_size: u32,
    pub side_px: u32,
    pub analysis: AnalysisReport,
}

/// Run the generate flow: validate, encode, serialize, analyze.
///
/// # Errors
///
/// * [`QrMagicError::InputValidation`] - empty text or out-of-range preview size
/// * [`QrMagicError::Encoding`] - text does not fit in any QR symbol at this level
pub fn generate_qr(form: &GenerateForm) -> Result<GeneratedQr, QrMagicError> {
    if form.text.is_empty() {
        return Err(QrMagicError::InputValidation {
            message: EMPTY_INPUT_WARNING.to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let preview_size = normalize_preview_size(form.preview_size)?;

    let request = EncodeRequestBuilder::default()
        .with_payload(form.text.as_str())
        .with_foreground(form.foreground)
        .with_background(form.background)
        .with_error_correction(form.error_correction)
        .build()?;

    let encoded = encode(&request)?;
    let png = encoded.to_png()?;
    let analysis = analyze_encoded(request.payload(), &encoded);
    let file_name = download_file_name(form.file_name.as_deref());

    info!(
        "Generated {file_name}: version {}, {}px, {} bytes",
        encoded.version(),
        encoded.side_px(),
        png.len()
    );

    Ok(GeneratedQr {
        png,
        file_name,
        preview_size,
        side_px: encoded.side_px(),
        analysis,
    })
}

/// Name offered for download: the user's name, or `QRCode`, plus `.png`.
///
/// Only the last path component of the input is kept, so the name never
/// points outside the output directory. `.` and `..` fall back to the default.
pub fn download_file_name(input: Option<&str>) -> String {
    let stem = input
        .and_then(|name| name.rsplit(PATH_SEPARATORS).next())
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..");

    match stem {
        Some(name) if name.to_ascii_lowercase().ends_with(PNG_EXTENSION) => name.to_string(),
        Some(name) => format!("{name}{PNG_EXTENSION}"),
        None => format!("{DEFAULT_FILE_NAME}{PNG_EXTENSION}"),
    }
}

/// Check the preview size range and snap it to the slider step.
#[track_caller]
pub fn normalize_preview_size(size: u32) -> Result<u32, QrMagicError> {
    if !(PREVIEW_SIZE_MIN..=PREVIEW_SIZE_MAX).contains(&size) {
        return Err(QrMagicError::InputValidation {
            message: format!(
                "Preview size must be between {PREVIEW_SIZE_MIN} and {PREVIEW_SIZE_MAX} px, got {size}"
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let snapped = (size + PREVIEW_SIZE_STEP / 2) / PREVIEW_SIZE_STEP * PREVIEW_SIZE_STEP;
    if snapped != size {
        debug!("Preview size {size} snapped to {snapped}");
    }

    Ok(snapped.clamp(PREVIEW_SIZE_MIN, PREVIEW_SIZE_MAX))
}

/// Write the PNG into `out_dir` under its download name.
///
/// # Errors
///
/// * [`QrMagicError::InputValidation`] - the name is not a bare file name
/// * [`QrMagicError::QrMagic`] - the directory or file cannot be written
pub fn save_png(out_dir: &Path, generated: &GeneratedQr) -> Result<PathBuf, QrMagicError> {
    let name = generated.file_name.as_str();
    let is_bare = !name.contains(PATH_SEPARATORS)
        && Path::new(name).file_name() == Some(OsStr::new(name));

    if !is_bare {
        return Err(QrMagicError::InputValidation {
            message: format!("Download name '{name}' must not contain a path"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    std::fs::create_dir_all(out_dir).map_err(|e| QrMagicError::QrMagic {
        message: format!("Failed to create {}: {e}", out_dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let path = out_dir.join(&generated.file_name);

    std::fs::write(&path, &generated.png).map_err(|e| QrMagicError::QrMagic {
        message: format!("Failed to write {}: {e}", path.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    info!("Saved QR code to {}", path.display());
    Ok(path)
}
