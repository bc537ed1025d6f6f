use crate::QRSERVER_READ_ENDPOINT;
use crate::decoder::{DecoderSettings, RetryPolicy};
use crate::error::config::ConfigError;

use common::ErrorLocation;
use models::{Color, ErrorCorrectionLevel};

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;

pub const PREVIEW_SIZE_MIN: u32 = 100;
pub const PREVIEW_SIZE_MAX: u32 = 500;
pub const PREVIEW_SIZE_STEP: u32 = 50;
pub const PREVIEW_SIZE_DEFAULT: u32 = 250;
pub const DEFAULT_FILE_NAME: &str = "QRCode";

const TIMEOUT_SECS_MAX: u64 = 300;
const MAX_RETRIES_LIMIT: u32 = 5;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

impl DecoderConfig {
    pub fn settings(&self) -> DecoderSettings {
        DecoderSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            },
        }
    }
}

/// Initial values for the generator controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorDefaults {
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub error_correction: ErrorCorrectionLevel,
    #[serde(default = "default_preview_size")]
    pub preview_size: u32,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for GeneratorDefaults {
    fn default() -> Self {
        Self {
            foreground: default_foreground(),
            background: default_background(),
            error_correction: ErrorCorrectionLevel::default(),
            preview_size: default_preview_size(),
            file_name: default_file_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub decoder: DecoderConfig,

    #[serde(default)]
    pub generator: GeneratorDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            decoder: DecoderConfig::default(),
            generator: GeneratorDefaults::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_endpoint() -> String {
    QRSERVER_READ_ENDPOINT.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    1
}
fn default_initial_backoff_ms() -> u64 {
    500
}
fn default_foreground() -> Color {
    Color::BLACK
}
fn default_background() -> Color {
    Color::WHITE
}
fn default_preview_size() -> u32 {
    PREVIEW_SIZE_DEFAULT
}
fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl AppConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(AppConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/config.json using atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation, directory creation,
    /// serialization, write or rename fails.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        let endpoint = Url::parse(&self.decoder.endpoint).map_err(|e| {
            ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid decoder endpoint '{}': {e}", self.decoder.endpoint),
            }
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Decoder endpoint must be http(s): {endpoint}"),
            });
        }

        if self.decoder.timeout_secs == 0 || self.decoder.timeout_secs > TIMEOUT_SECS_MAX {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid decoder timeout: {}s (must be 1-{TIMEOUT_SECS_MAX})",
                    self.decoder.timeout_secs
                ),
            });
        }

        if self.decoder.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid max_retries: {} (must be 0-{MAX_RETRIES_LIMIT})",
                    self.decoder.max_retries
                ),
            });
        }

        if !(PREVIEW_SIZE_MIN..=PREVIEW_SIZE_MAX).contains(&self.generator.preview_size) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid preview size: {} (must be {PREVIEW_SIZE_MIN}-{PREVIEW_SIZE_MAX})",
                    self.generator.preview_size
                ),
            });
        }

        if self.generator.file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Default file name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
