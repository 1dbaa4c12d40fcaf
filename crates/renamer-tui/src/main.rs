//! Rename files from a full-screen file browser.
//!
//! ```sh
//! rename-gui --workdir ~/Downloads
//! ```

use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};

use clap::Parser;
use renamer::config::RenamerConfig;
use renamer::ui::UiState;
use renamer::ui::tracing::UiTracingLayer;
use renamer_tui::{TuiConfig, run_tui};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Browse to a file, type its new name, press Enter.
#[derive(Parser)]
#[command(name = "rename-gui")]
struct Cli {
    /// Directory the browser opens in
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    /// Increase log verbosity in the log pane (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    // The log pane is hidden by default, so start one level chattier than
    // the console.
    let config = RenamerConfig::new(&cli.workdir, cli.verbose.saturating_add(1));

    let (tracing_layer, log_buffer) = UiTracingLayer::new();
    tracing_subscriber::registry()
        .with(config.level_filter())
        .with(tracing_layer)
        .init();

    let state = Arc::new(Mutex::new(UiState::default()));
    let tui_config = TuiConfig {
        start_dir: config.workdir.clone(),
        voice: false,
        log_buffer: Some(log_buffer),
    };

    match run_tui(state, tui_config) {
        Ok(summary) => {
            info!(succeeded = summary.succeeded, failed = summary.failed, "session finished");
            if summary.succeeded + summary.failed > 0 {
                println!(
                    "{} renamed, {} failed.",
                    summary.succeeded, summary.failed
                );
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
