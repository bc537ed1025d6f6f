use crate::error::QrMagicError;

use common::ErrorLocation;
use models::DecodedSymbols;
use qr_core::{DecodeRequest, QrServerClient};

use std::panic::Location;
use std::path::Path;

use log::{debug, info, warn};

pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
pub const NOTHING_FOUND_WARNING: &str = "No QR code detected.";

/// Result of the decode flow that is not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// At least one payload was read. Only the first is surfaced.
    Decoded(DecodedSymbols),
    /// The image was accepted but holds no readable QR symbol.
    NothingFound,
}

impl DecodeOutcome {
    pub fn surfaced(&self) -> Option<&str> {
        match self {
            DecodeOutcome::Decoded(symbols) => symbols.first(),
            DecodeOutcome::NothingFound => None,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, DecodeOutcome::NothingFound)
    }

    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self.surfaced() {
            Some(payload) => format!("Decoded Data: {payload}"),
            None => NOTHING_FOUND_WARNING.to_string(),
        }
    }
}

impl From<DecodedSymbols> for DecodeOutcome {
    fn from(symbols: DecodedSymbols) -> Self {
        if symbols.is_empty() {
            DecodeOutcome::NothingFound
        } else {
            DecodeOutcome::Decoded(symbols)
        }
    }
}

/// Reject uploads whose name does not end in png, jpg or jpeg.
#[track_caller]
pub fn check_upload_name(file_name: &str) -> Result<(), QrMagicError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) if ALLOWED_UPLOAD_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(QrMagicError::InputValidation {
            message: format!(
                "Unsupported upload '{file_name}': expected one of {}",
                ALLOWED_UPLOAD_EXTENSIONS.join(", ")
            ),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Decode an uploaded file body.
///
/// # Errors
///
/// * [`QrMagicError::InputValidation`] - bad extension or undecodable image
/// * [`QrMagicError::Network`] / [`QrMagicError::Service`] / [`QrMagicError::Parse`] -
///   the recognition service could not produce a result
pub async fn decode_upload(
    client: &QrServerClient,
    file_name: &str,
    bytes: &[u8],
) -> Result<DecodeOutcome, QrMagicError> {
    check_upload_name(file_name)?;
    decode_accepted(client, file_name, bytes).await
}

/// Read `path` from disk and decode it as an upload.
///
/// The extension is checked before the file is read.
pub async fn decode_file(
    client: &QrServerClient,
    path: &Path,
) -> Result<DecodeOutcome, QrMagicError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();

    check_upload_name(&file_name)?;

    let bytes = std::fs::read(path).map_err(|e| QrMagicError::InputValidation {
        message: format!("Failed to read {}: {e}", path.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    decode_accepted(client, &file_name, &bytes).await
}

/// Decode bytes whose file name already passed [`check_upload_name`].
async fn decode_accepted(
    client: &QrServerClient,
    file_name: &str,
    bytes: &[u8],
) -> Result<DecodeOutcome, QrMagicError> {
    debug!("Decoding upload {file_name} ({} bytes)", bytes.len());

    let request = DecodeRequest::from_bytes(bytes)?;
    let symbols = client.decode(&request).await?;

    if symbols.len() > 1 {
        info!(
            "{} symbols found in {file_name}, surfacing the first",
            symbols.len()
        );
    }

    let outcome = DecodeOutcome::from(symbols);
    if outcome.is_warning() {
        warn!("No QR code detected in {file_name}");
    }

    Ok(outcome)
}
