// Startup module - banner and effective settings
//
// Headless runs print a short banner to stdout before logging starts. The
// TUI can't print (it owns the screen), so the same summary goes to the
// logs strip instead.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
}

/// One line of the settings summary
struct Setting {
    name: &'static str,
    value: String,
}

fn settings(config: &Config) -> Vec<Setting> {
    let catalog = config
        .catalog_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(bundled)".to_string());

    vec![
        Setting {
            name: "catalog",
            value: catalog,
        },
        Setting {
            name: "scale",
            value: format!("x{}", config.scale),
        },
        Setting {
            name: "buffer",
            value: format!("{} lines", config.buffer),
        },
        Setting {
            name: "row height",
            value: format!("{} lines", config.row_height),
        },
        Setting {
            name: "icons",
            value: config.icons.len().to_string(),
        },
    ]
}

/// Print the banner and settings (headless mode)
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}Stockpile{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Virtualized inventory browser{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    for setting in settings(config) {
        println!("    {DIM}{:<12}{RESET} {}", setting.name, setting.value);
    }
    println!();
}

/// Write the same summary to the log (TUI mode)
pub fn log_startup(config: &Config) {
    tracing::info!("Stockpile v{}", VERSION);
    for setting in settings(config) {
        tracing::info!("  {:<12} {}", setting.name, setting.value);
    }
}
