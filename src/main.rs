// Stockpile - virtualized inventory browser
//
// Loads an item catalog, multiplies it into a large working set and shows
// it as a scrolling list where only rows near the viewport are active.
//
// Architecture:
// - Catalog: item records, loading and working-set generation
// - Viewport: visible range tracking and deferred (idle) work
// - List: rows, selection and the list controller
// - Screen: wires the above into one inventory screen
// - TUI (ratatui): draws the screen and feeds it input

mod catalog;
mod cli;
mod config;
mod list;
mod logging;
mod screen;
mod startup;
mod tui;
mod viewport;

use anyhow::{Context, Result};
use catalog::icons::IconLookup;
use catalog::ItemRecord;
use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use screen::{InventoryScreen, ScreenSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::components::DetailPanel;
use viewport::IdleQueue;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Subcommands (config, catalog) print and exit
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    cli.apply(&mut config);

    let log_buffer = LogBuffer::new();

    // In TUI mode: capture logs to buffer (prevents garbling the display)
    // In headless mode: output logs to stdout
    // File logging: optionally write JSON to rotating files as well
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("stockpile={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must live until exit so buffered lines are flushed
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                if config.enable_tui {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                } else {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer())
                        .init();
                }
                None
            } else {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                if config.enable_tui {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                } else {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer())
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                }

                Some(guard)
            }
        } else {
            if config.enable_tui {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer())
                    .init();
            }
            None
        };

    let source = catalog::load(config.catalog_path.as_deref())?;
    let missing_icons = IconLookup::new(config.icons.clone()).validate(&source);
    if missing_icons > 0 {
        tracing::warn!("{} item(s) will use the fallback icon", missing_icons);
    }

    if config.enable_tui {
        startup::log_startup(&config);
        tui::run_tui(config, source, log_buffer).await?;
    } else {
        startup::print_startup(&config);
        run_headless(&config, &source)?;
    }

    Ok(())
}

/// Build the screen once without a terminal and report what activated
fn run_headless(config: &Config, source: &[ItemRecord]) -> Result<()> {
    let settings = ScreenSettings::from(config);
    let mut screen = InventoryScreen::new(settings, DetailPanel::new());
    let mut idle = IdleQueue::new();

    screen.init(source).context("Failed to build inventory")?;
    screen
        .layout_pass(settings.viewport_height)
        .context("Layout pass failed")?;
    screen.schedule_finalize(&mut idle);
    idle.run_pending(&mut screen)?;

    let range = screen
        .current_range()
        .context("Finalize did not publish a range")?;
    tracing::info!(
        "{} rows, {} active in [{}, {}]",
        screen.len(),
        screen.active_count(),
        range.min,
        range.max
    );

    if let Some(selected) = screen.selected() {
        tracing::info!(
            "Selected '{}' (stat {})",
            selected.record().name,
            selected.record().stat
        );
    }
    Ok(())
}
