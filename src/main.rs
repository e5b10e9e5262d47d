//! Portfolio contact form TUI
//!
//! A terminal user interface for sending a message through a portfolio's
//! contact form. Run with: foliotui [--endpoint <URL>] [--quality <TIER>]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use foliotui::app::App;
use foliotui::config::Config;
use foliotui::contact_client::{ContactSubmitter, DryRunSubmitter, HttpSubmitter};
use foliotui::device::DeviceSignals;
use foliotui::event::EventHandler;
use foliotui::logging;
use foliotui::performance::{PerformanceTuner, Quality};
use foliotui::ui;

/// Command line options. Flags override the config file.
#[derive(Debug, Parser)]
#[command(name = "foliotui", version, about = "Portfolio contact form in your terminal")]
struct Cli {
    /// Config file (defaults to <config dir>/foliotui/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Contact endpoint receiving the JSON submission
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// Don't send anything, just log the submission
    #[arg(long)]
    dry_run: bool,

    /// Start at this quality tier instead of detecting one
    #[arg(short, long, value_enum)]
    quality: Option<Quality>,
}

/// Entry point for the application.
///
/// Set FOLIOTUI_LOG=<file> to write logs (RUST_LOG controls the level).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let app = build_app(&cli, &config)?;

    // Initialize the terminal
    let terminal = ratatui::init();

    // Run the application
    let result = run_app(terminal, app).await;

    // Restore the terminal to its original state
    ratatui::restore();

    result
}

/// Wires the submitter and tuner from CLI flags and config.
fn build_app(cli: &Cli, config: &Config) -> Result<App> {
    let endpoint = cli.endpoint.clone().or_else(|| config.contact.endpoint.clone());

    let (submitter, destination): (Arc<dyn ContactSubmitter>, String) = match endpoint {
        Some(url) if !cli.dry_run => {
            let timeout = Duration::from_secs(config.contact.timeout_seconds);
            let client = HttpSubmitter::new(url.clone(), timeout)
                .context("Failed to build HTTP client")?;
            (Arc::new(client), url)
        }
        _ => (Arc::new(DryRunSubmitter), "dry run".to_string()),
    };
    tracing::info!(destination = %destination, "Contact submissions configured");

    let settings = &config.performance;
    let signals = DeviceSignals::probe(settings.reduced_motion);
    let mut tuner = PerformanceTuner::new(
        &signals,
        settings.min_fps,
        Duration::from_millis(settings.sample_window_ms),
    );
    if let Some(quality) = cli.quality.or(settings.quality) {
        tuner.set_quality(quality);
    }

    Ok(App::new(submitter, tuner, destination))
}

/// Main application loop.
///
/// This function runs the TUI event loop:
/// 1. Draw the current UI state and sample the frame
/// 2. Collect a finished submission, if any
/// 3. Handle user input events
/// 4. Repeat until the user quits
async fn run_app(mut terminal: ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    let event_handler = EventHandler::new();
    app.start(Instant::now());

    loop {
        terminal
            .draw(|frame| ui::draw(frame, &app))
            .context("Failed to draw UI")?;
        app.on_frame(Instant::now());

        app.poll_submission().await;

        if let Some(action) = event_handler.next()? {
            if app.handle_event(action) {
                break;
            }
        }
    }

    app.stop();
    Ok(())
}
