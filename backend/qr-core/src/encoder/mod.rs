//! QR image rendering.
//!
//! Symbol layout (version selection, masking, Reed-Solomon) is delegated to the
//! `qrcode` crate. This module only maps the request onto it and paints the
//! module grid into an RGB raster.

use crate::error::EncodeError;

use models::{EncodeRequest, ErrorCorrectionLevel};

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use log::{debug, trace};
use qrcode::{Color as ModuleColor, EcLevel, QrCode, Version};

/// Side length of one module, in pixels.
pub const MODULE_SIZE_PX: u32 = 10;
/// Light margin around the symbol, in modules.
pub const BORDER_MODULES: u32 = 4;

/// A rendered QR symbol together with the parameters actually used.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    image: RgbImage,
    version: i16,
    modules: u32,
    error_correction: ErrorCorrectionLevel,
}

impl EncodedImage {
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Symbol version picked for the payload (1-40).
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Modules per side, excluding the border.
    pub fn modules(&self) -> u32 {
        self.modules
    }

    pub fn error_correction(&self) -> ErrorCorrectionLevel {
        self.error_correction
    }

    /// Image side length in pixels.
    pub fn side_px(&self) -> u32 {
        self.image.width()
    }

    /// Serialize the raster as PNG.
    #[track_caller]
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

        trace!("Serialized {}px QR image to {} PNG bytes", self.side_px(), bytes.len());
        Ok(bytes)
    }
}

pub(crate) fn ec_level(level: ErrorCorrectionLevel) -> EcLevel {
    match level {
        ErrorCorrectionLevel::L => EcLevel::L,
        ErrorCorrectionLevel::M => EcLevel::M,
        ErrorCorrectionLevel::Q => EcLevel::Q,
        ErrorCorrectionLevel::H => EcLevel::H,
    }
}

/// Render `request` as a QR image.
///
/// The smallest version that holds the payload at the requested level is
/// chosen. Each module is `MODULE_SIZE_PX` square and the symbol is
/// surrounded by a `BORDER_MODULES` quiet zone in the background color.
///
/// # Errors
///
/// Returns [`EncodeError::Capacity`] when the payload is too long for any
/// version at this level.
#[track_caller]
pub fn encode(request: &EncodeRequest) -> Result<EncodedImage, EncodeError> {
    let level = request.error_correction();
    let code = QrCode::with_error_correction_level(request.payload(), ec_level(level))?;

    let version = match code.version() {
        Version::Normal(v) | Version::Micro(v) => v,
    };
    let modules = code.width() as u32;
    let side = (modules + 2 * BORDER_MODULES) * MODULE_SIZE_PX;

    let dark = Rgb(request.foreground().to_array());
    let light = Rgb(request.background().to_array());

    let mut image = RgbImage::from_pixel(side, side, light);

    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != ModuleColor::Dark {
            continue;
        }

        let x = (i as u32 % modules + BORDER_MODULES) * MODULE_SIZE_PX;
        let y = (i as u32 / modules + BORDER_MODULES) * MODULE_SIZE_PX;

        for dy in 0..MODULE_SIZE_PX {
            for dx in 0..MODULE_SIZE_PX {
                image.put_pixel(x + dx, y + dy, dark);
            }
        }
    }

    debug!(
        "Encoded {} chars as version {version} ({modules}x{modules} modules, EC {level}), {side}px",
        request.payload().chars().count()
    );

    Ok(EncodedImage {
        image,
        version,
        modules,
        error_correction: level,
    })
}
