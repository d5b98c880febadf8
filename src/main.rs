// LuxScale - lighting assistant landing page for the terminal
//
// The page is a set of small state machines driven by one scheduler:
// a typewriter placeholder on the chat input, exclusive toggle groups
// (login/signup, chat/study, study wizard steps) and two simulated upload
// dialogs (DIALux report, image sketch).
//
// Architecture:
// - Page components (rotator, toggle, wizard, upload): pure state + Scheduler
// - TUI (ratatui): renders components, routes keys, drives timers
// - Headless: the typewriter alone on stdout
// - Config / startup / logging: ambient plumbing

mod cli;
mod config;
mod error;
mod headless;
mod logging;
mod rotator;
mod scheduler;
mod startup;
mod theme;
mod toggle;
mod tui;
mod upload;
mod util;
mod wizard;

use anyhow::Result;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Load configuration first to determine TUI vs headless mode
    let config = Config::from_env();

    // Create log buffer for TUI mode
    let log_buffer = LogBuffer::new();

    // Initialize tracing/logging with conditional output
    // In TUI mode: capture logs to buffer (prevents garbling the display)
    // In headless mode: output logs to stderr (stdout carries the typewriter)
    // File logging: optionally write to rotating log files (in addition to above)
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("luxscale={}", config.logging.level);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Set up file logging if enabled (non-blocking writer with rotation)
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            // Create log directory if it doesn't exist
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                // Fall back to non-file logging
                if config.enable_tui {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                } else {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                        .init();
                }
                None
            } else {
                // Create rolling file appender based on configured rotation
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

                // Wrap in non-blocking writer (writes happen in background thread)
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
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
                        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
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
            // No file logging - initialize without file layer
            if config.enable_tui {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                    .init();
            }

            None
        };

    // Create startup registry from config (updated as components are built)
    let mut registry = startup::StartupRegistry::from_config(&config);

    if config.enable_tui {
        // Build the page before the banner so it shows what actually came up
        let (preview_tx, preview_rx) = mpsc::channel(8);
        let app = tui::app::App::new(log_buffer, &config, &mut registry, preview_tx)?;

        startup::print_startup_with_registry(&config, &registry);
        startup::log_startup_with_registry(&config, &registry);

        // Run the TUI in the main task; returns when the user quits
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(app, preview_rx).await {
            tracing::error!("TUI error: {:?}", e);
        }
    } else {
        let headless = headless::Headless::new(&config, &mut registry);

        startup::print_startup_with_registry(&config, &registry);
        startup::log_startup_with_registry(&config, &registry);

        tracing::info!("TUI disabled, running in headless mode");
        headless.run().await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
