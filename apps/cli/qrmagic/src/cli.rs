//! Command-line surface.

use crate::commands::generate::GenerateForm;
use crate::logger::Verbosity;

use models::{Color, ErrorCorrectionLevel};
use qr_core::config::GeneratorDefaults;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "qrmagic", version, about = "Generate styled QR codes and decode QR images")]
pub struct Cli {
    /// Directory holding config.json (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory for qrmagic.log (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only errors on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity {
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render text or a URL as a QR code PNG
    Generate(GenerateArgs),
    /// Read a QR code from a png/jpg/jpeg image
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Text or URL to encode
    pub text: String,

    /// Module color, #RRGGBB
    #[arg(long = "fg")]
    pub foreground: Option<Color>,

    /// Background color, #RRGGBB
    #[arg(long = "bg")]
    pub background: Option<Color>,

    /// Error correction level: L, M, Q or H
    #[arg(long = "ec")]
    pub error_correction: Option<ErrorCorrectionLevel>,

    /// Preview size in px (100-500, step 50)
    #[arg(long)]
    pub preview_size: Option<u32>,

    /// Download file name; ".png" is appended
    #[arg(long)]
    pub file_name: Option<String>,

    /// Where to write the PNG
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

impl GenerateArgs {
    /// Merge the flags over the configured defaults.
    pub fn to_form(&self, defaults: &GeneratorDefaults) -> GenerateForm {
        let mut form = GenerateForm::with_defaults(self.text.clone(), defaults);

        if let Some(color) = self.foreground {
            form.foreground = color;
        }
        if let Some(color) = self.background {
            form.background = color;
        }
        if let Some(level) = self.error_correction {
            form.error_correction = level;
        }
        if let Some(size) = self.preview_size {
            form.preview_size = size;
        }
        if self.file_name.is_some() {
            form.file_name = self.file_name.clone();
        }

        form
    }
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Image to decode
    pub image: PathBuf,
}
