//! Observability configuration: logging and the frame counter
//!
//! - Logging: level, file output, rotation
//! - FPS: how often the title bar frame counter refreshes

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Log Rotation
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config. Unknown values fall back to daily.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to TUI buffer or stdout)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names ("stockpile" -> "stockpile.2024-01-15")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "stockpile".to_string(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::parse(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame Counter
// ─────────────────────────────────────────────────────────────────────────────

/// Frame counter settings
#[derive(Debug, Clone, PartialEq)]
pub struct FpsConfig {
    /// Seconds between recomputations of the displayed rate (0.1..=5)
    pub refresh_interval_secs: f32,
}

impl FpsConfig {
    pub const MIN_INTERVAL: f32 = 0.1;
    pub const MAX_INTERVAL: f32 = 5.0;
}

impl Default for FpsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 1.0,
        }
    }
}

/// Frame counter settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFps {
    pub refresh_interval_secs: Option<f32>,
}

impl FpsConfig {
    /// Create from file config with defaults, clamping the interval
    pub fn from_file(file: Option<FileFps>) -> Self {
        let file = file.unwrap_or_default();
        let interval = file
            .refresh_interval_secs
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(Self::MIN_INTERVAL, Self::MAX_INTERVAL))
            .unwrap_or(Self::default().refresh_interval_secs);

        Self {
            refresh_interval_secs: interval,
        }
    }
}
