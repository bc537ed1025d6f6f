use qrmagic::cli::{Cli, Command};
use qrmagic::commands::{decode, generate};
use qrmagic::error::QrMagicError;
use qrmagic::logger::initialize as LoggerInitialize;

use common::ErrorLocation;
use qr_core::QrServerClient;
use qr_core::config::AppConfig;

use std::fs::create_dir_all;
use std::panic::Location;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

const APP_DIR_NAME: &str = "qrmagic";
const LOG_DIR_NAME: &str = "logs";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) if e.is_warning() => {
            warn!("{e}");
            eprintln!("Warning: {}", e.user_message());
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, QrMagicError> {
    let verbosity = cli.verbosity();
    let log_dir = resolve_dir(cli.log_dir, dirs::data_local_dir(), &[APP_DIR_NAME, LOG_DIR_NAME])?;
    create_dir_all(&log_dir).map_err(|e| QrMagicError::QrMagic {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    LoggerInitialize(&log_dir, verbosity)?;

    let config_dir = resolve_dir(cli.config_dir, dirs::config_dir(), &[APP_DIR_NAME])?;
    let config = AppConfig::load(&config_dir)?;

    info!("QRMagic starting (log directory: {})", log_dir.display());

    match cli.command {
        Command::Generate(args) => {
            let form = args.to_form(&config.generator);
            let generated = generate::generate_qr(&form)?;
            let path = generate::save_png(&args.out_dir, &generated)?;

            let analysis = serde_json::to_string_pretty(&generated.analysis).map_err(|e| {
                QrMagicError::QrMagic {
                    message: format!("Failed to format analysis: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            println!(
                "Generated QR Code: {} ({}px, preview {}px)",
                path.display(),
                generated.side_px,
                generated.preview_size
            );
            println!("QR Code Analysis:");
            println!("{analysis}");
        }
        Command::Decode(args) => {
            let client = QrServerClient::new(&config.decoder.endpoint, config.decoder.settings())?;
            let outcome = decode::decode_file(&client, &args.image).await?;

            if outcome.is_warning() {
                eprintln!("Warning: {}", outcome.message());
            } else {
                println!("{}", outcome.message());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_dir(
    explicit: Option<PathBuf>,
    platform: Option<PathBuf>,
    segments: &[&str],
) -> Result<PathBuf, QrMagicError> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    let base = platform.ok_or_else(|| QrMagicError::QrMagic {
        message: String::from("No platform directory available; pass it explicitly"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(segments.iter().fold(base, |dir, segment| dir.join(segment)))
}
