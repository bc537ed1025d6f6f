//! Logging for the QRMagic front end.
//!
//! Two sinks share one global logger. Stderr carries what the user asked to
//! see (stdout is reserved for command output); `qrmagic.log` always records
//! at [`FILE_LEVEL`] with source positions. Installing is idempotent.

use crate::error::QrMagicError;

use common::ErrorLocation;

use std::io::stderr;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339_seconds;
use log::{LevelFilter, debug, warn};

static INSTALL_ONCE: Once = Once::new();
static INSTALL_ATTEMPTED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "qrmagic.log";

#[cfg(debug_assertions)]
pub const FILE_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
pub const FILE_LEVEL: LevelFilter = LevelFilter::Info;

/// HTTP stack crates that are chatty at debug level.
const NOISY_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

/// How much reaches stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verbosity {
    /// Number of `-v` flags.
    pub verbose: u8,
    /// `--quiet` wins over any `-v`.
    pub quiet: bool,
}

impl Verbosity {
    pub fn console_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }

        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Install the stderr and file sinks under `log_dir`.
///
/// A second call logs a warning and returns Ok without touching the first
/// configuration.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or another global
/// logger is already installed.
pub fn initialize(log_dir: &Path, verbosity: Verbosity) -> Result<(), QrMagicError> {
    if INSTALL_ATTEMPTED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized, ignoring {verbosity:?}");
        return Ok(());
    }

    let mut result = Ok(());
    INSTALL_ONCE.call_once(|| {
        result = install(log_dir, verbosity);
    });

    if result.is_ok() {
        debug!(
            "Logging to stderr at {} and {} at {FILE_LEVEL}",
            verbosity.console_level(),
            log_dir.join(LOG_FILE_NAME).display()
        );
    }

    result
}

#[track_caller]
fn install(log_dir: &Path, verbosity: Verbosity) -> Result<(), QrMagicError> {
    let colors = ColoredLevelConfig::new()
        .trace(Magenta)
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red);

    let console = Dispatch::new()
        .level(verbosity.console_level())
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{level:>5} {message}",
                level = colors.color(record.level()),
            ))
        })
        .chain(stderr());

    let log_file = fern::log_file(log_dir.join(LOG_FILE_NAME)).map_err(|e| {
        QrMagicError::QrMagic {
            message: format!("Failed to open {LOG_FILE_NAME} in {}: {e}", log_dir.display()),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    let file = Dispatch::new()
        .level(FILE_LEVEL)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{date} {level} {target}] {message} [{file}:{line}]",
                date = format_rfc3339_seconds(SystemTime::now()),
                level = record.level(),
                target = record.target(),
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(log_file);

    let root = NOISY_TARGETS
        .iter()
        .fold(Dispatch::new(), |dispatch, target| {
            dispatch.level_for(*target, LevelFilter::Warn)
        });

    root.chain(console)
        .chain(file)
        .apply()
        .map_err(|e| QrMagicError::QrMagic {
            message: format!("Failed to install logger: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}
