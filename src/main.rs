// CiteSleuth - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml)
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use citesleuth::app;
pub use citesleuth::core;
pub use citesleuth::platform;
pub use citesleuth::ui;
pub use citesleuth::util;

use crate::app::fetch::FetchConfig;
use crate::app::state::{AppState, BriefSource};
use crate::core::model::Severity;
use clap::Parser;
use std::path::PathBuf;

/// CiteSleuth - Desktop reviewer for legal-brief citations.
///
/// Point CiteSleuth at a brief JSON file (or start it bare for the built-in
/// sample) to review its citations against verification results in an
/// annotated, filterable view.
#[derive(Parser, Debug)]
#[command(name = "CiteSleuth", version, about)]
struct Cli {
    /// Brief JSON file to load (uses the built-in sample if omitted).
    brief: Option<PathBuf>,

    /// Number of leading fetch attempts that fail (exercises the retry path).
    #[arg(long = "fail-attempts")]
    fail_attempts: Option<u32>,

    /// Initial severity filter: critical, warning, or verified.
    #[arg(short = 'f', long = "filter-level")]
    filter_level: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Parse a CLI severity filter string. Unknown values return None and are
/// reported after logging is up.
fn parse_filter_level(value: &str) -> Option<Severity> {
    match value.to_ascii_lowercase().as_str() {
        "critical" => Some(Severity::Critical),
        "warning" => Some(Severity::Warning),
        "verified" | "none" => Some(Severity::None),
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load configuration before logging so the
    // config's [logging] level can participate in the filter priority.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_file = platform_paths.config_file();
    let (config, config_error) = match platform::config::load_raw_config(&config_file) {
        Ok(Some(raw)) => (platform::config::validate_config(raw), None),
        Ok(None) => (platform::config::AppConfig::default(), None),
        Err(e) => (platform::config::AppConfig::default(), Some(e)),
    };

    // Initialise logging subsystem
    util::logging::init(cli.debug, config.log_level.as_deref());

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Configuration invalid; using defaults");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "CiteSleuth starting"
    );

    // Assemble the fetch config: CLI fail-attempts overrides config.toml.
    let fetch_config = FetchConfig {
        delay_ms: config.fetch_delay_ms,
        max_attempts: config.fetch_max_attempts,
        retry_delay_ms: config.fetch_retry_delay_ms,
        fail_attempts: cli.fail_attempts.unwrap_or(config.fetch_fail_attempts),
    };

    // Determine the brief source: CLI file > built-in sample.
    let source = match cli.brief {
        Some(path) => BriefSource::File(path),
        None => BriefSource::Sample,
    };
    tracing::info!(source = %source.describe(), "Brief source selected");

    // Create application state. The initial fetch is requested here and
    // started by the first gui frame.
    let mut state = AppState::new(source, cli.debug);

    if let Some(ref level) = cli.filter_level {
        match parse_filter_level(level) {
            Some(severity) => state.filter_state.severity = Some(severity),
            None => tracing::warn!(level, "Unknown --filter-level value (ignored)"),
        }
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1240.0, 800.0])
            .with_min_inner_size([860.0, 520.0]),
        ..Default::default()
    };

    let verify_delay_ms = config.verify_delay_ms;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(gui::CiteSleuthApp::new(
                state,
                fetch_config,
                verify_delay_ms,
                platform_paths,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch CiteSleuth GUI: {e}");
        std::process::exit(1);
    }
}
