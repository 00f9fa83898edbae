// CLI module - command-line argument parsing and handlers
//
// Top-level flags override config for a single run. Subcommands:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print the config file location
// - catalog [--json]: Print the generated item list

use crate::catalog::{self, icons::IconLookup};
use crate::config::{Config, MAX_SCALE, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Stockpile - virtualized inventory browser for the terminal
#[derive(Parser, Debug)]
#[command(name = "stockpile")]
#[command(version = VERSION)]
#[command(about = "Virtualized inventory browser for the terminal", long_about = None)]
pub struct Cli {
    /// Run without the TUI: build the list, finalize it, log a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Repeat the catalog this many times
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SCALE as i64))]
    pub scale: Option<u32>,

    /// Catalog JSON file (default: bundled catalog)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
    /// Print the generated item list
    Catalog {
        /// One JSON object per line instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if self.headless {
            config.enable_tui = false;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
    }
}

/// Handle subcommands. Returns true if a command was handled (exit after).
pub fn handle_command(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path();
            } else if *show {
                handle_config_show(cli);
            } else if *reset {
                handle_config_reset();
            } else {
                println!("Usage: stockpile config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        Some(Commands::Catalog { json }) => {
            handle_catalog(cli, *json);
            true
        }
        None => false,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show(cli: &Cli) {
    let mut config = Config::from_env();
    cli.apply(&mut config);

    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!("# enable_tui = {}", config.enable_tui);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_catalog(cli: &Cli, json: bool) {
    let mut config = Config::from_env();
    cli.apply(&mut config);

    let items = catalog::load(config.catalog_path.as_deref())
        .and_then(|source| catalog::generate(&source, config.scale).map_err(Into::into));
    let items = match items {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let icons = IconLookup::new(config.icons.clone());

    for (index, item) in items.iter().enumerate() {
        let line = if json {
            match serde_json::to_string(item.as_ref()) {
                Ok(line) => line,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        } else {
            format!(
                "{:>5}  {}  {:<24} {:>5}",
                index,
                icons.resolve(item.icon_index),
                item.name,
                item.stat
            )
        };
        // Broken pipe (e.g. piped into `head`) ends output quietly
        if writeln!(out, "{}", line).is_err() {
            return;
        }
    }
}
