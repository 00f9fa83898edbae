//! Configuration for the inventory browser
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/stockpile/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! Command-line flags are applied on top by `main` after loading.

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use observability::{FileFps, FileLogging, FpsConfig, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound for the overscan buffer, in lines
pub const MAX_BUFFER: f32 = 500.0;

/// Upper bound for the catalog repetition scale
pub const MAX_SCALE: u32 = 10_000;

/// Allowed lines per row
pub const ROW_HEIGHT_RANGE: std::ops::RangeInclusive<u16> = 1..=3;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog file to load (None = bundled catalog)
    pub catalog_path: Option<PathBuf>,

    /// How many times the source catalog is repeated to build the list
    pub scale: u32,

    /// Overscan above and below the viewport, in lines
    pub buffer: f32,

    /// Viewport height assumed before the first layout pass
    pub viewport_height: f32,

    /// Lines per row
    pub row_height: u16,

    /// Icon glyphs indexed by `IconIndex`
    pub icons: Vec<String>,

    /// Theme name: "Dark", "Light", "Monokai", "Dracula", "Nord", "Solarized"
    pub theme: String,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Show the frame counter in the title bar
    pub show_fps: bool,

    /// Frame counter settings
    pub fps: FpsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            scale: 10,
            buffer: 8.0,
            viewport_height: 24.0,
            row_height: 1,
            icons: crate::catalog::icons::default_glyphs(),
            theme: "Dark".to_string(),
            enable_tui: true,
            show_fps: cfg!(debug_assertions),
            fps: FpsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub catalog_path: Option<String>,
    pub scale: Option<u32>,
    pub buffer: Option<f32>,
    pub viewport_height: Option<f32>,
    pub row_height: Option<u16>,
    pub icons: Option<Vec<String>>,
    pub theme: Option<String>,
    pub show_fps: Option<bool>,

    /// Optional [fps] section
    pub fps: Option<FileFps>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl Config {
    /// Get the config file path: ~/.config/stockpile/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("stockpile").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists.
    ///
    /// A config file that exists but cannot be read or parsed ends the
    /// process with a readable message instead of silently using defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Numbers written as strings (scale = 10, not \"10\")");
                    eprintln!("    - Malformed icon array syntax");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `stockpile config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file config with environment lookups.
    ///
    /// Out-of-range values are clamped (and reported on stderr, since
    /// logging is not up yet when config loads).
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Catalog: env > file > bundled
        let catalog_path = env("STOCKPILE_CATALOG")
            .or(file.catalog_path)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        // Scale: env > file > default, clamped to [1, MAX_SCALE]
        let scale = env("STOCKPILE_SCALE")
            .and_then(|v| v.parse().ok())
            .or(file.scale)
            .unwrap_or(defaults.scale);
        let scale = if scale < 1 {
            eprintln!("Warning: scale must be at least 1 (got {}), using 1", scale);
            1
        } else if scale > MAX_SCALE {
            eprintln!(
                "Warning: scale is capped at {} (got {}), using {}",
                MAX_SCALE, scale, MAX_SCALE
            );
            MAX_SCALE
        } else {
            scale
        };

        // Buffer: env > file > default, clamped to [0, MAX_BUFFER]
        let raw_buffer = env("STOCKPILE_BUFFER")
            .and_then(|v| v.parse().ok())
            .or(file.buffer)
            .unwrap_or(defaults.buffer);
        let buffer = if raw_buffer.is_finite() {
            raw_buffer.clamp(0.0, MAX_BUFFER)
        } else {
            defaults.buffer
        };
        if buffer != raw_buffer {
            eprintln!(
                "Warning: buffer {} outside 0..={}, using {}",
                raw_buffer, MAX_BUFFER, buffer
            );
        }

        let viewport_height = file
            .viewport_height
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(defaults.viewport_height);

        let row_height = file
            .row_height
            .map(|h| h.clamp(*ROW_HEIGHT_RANGE.start(), *ROW_HEIGHT_RANGE.end()))
            .unwrap_or(defaults.row_height);

        let icons = file
            .icons
            .filter(|icons| !icons.is_empty())
            .unwrap_or(defaults.icons);

        // Theme: env > file > default
        let theme = env("STOCKPILE_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // TUI toggle: env only (runtime flag)
        let enable_tui = !env("STOCKPILE_NO_TUI").is_some_and(|v| is_truthy(&v));

        let show_fps = file.show_fps.unwrap_or(defaults.show_fps);
        let fps = FpsConfig::from_file(file.fps);
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            catalog_path,
            scale,
            buffer,
            viewport_height,
            row_height,
            icons,
            theme,
            enable_tui,
            show_fps,
            fps,
            logging,
        }
    }
}
