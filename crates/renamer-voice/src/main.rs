//! Rename files by speaking the new name.
//!
//! Reads the speech endpoint from `RENAMER_SPEECH_ENDPOINT` (or
//! `--speech-endpoint`) and an optional bearer key from `RENAMER_SPEECH_KEY`.
//!
//! # Examples
//!
//! ```sh
//! rename-voice --speech-endpoint http://localhost:9000/stt --workdir ~/notes
//!
//! # Longer clips, custom recorder wrapper
//! rename-voice --clip-secs 8 --recorder ./my-arecord
//! ```

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use renamer::config::RenamerConfig;
use renamer::ui::tracing::UiTracingLayer;
use renamer::ui::{UiState, request_quit};
use renamer_tui::{TuiConfig, spawn_tui};
use renamer_voice::{CommandRecorder, HttpTranscriber, Listener, VoiceConfig};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Select a file, press `l` and speak the new name, press `r` to rename.
#[derive(Parser)]
#[command(name = "rename-voice")]
struct Cli {
    /// Directory the browser opens in.
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    /// Speech-to-text endpoint (overrides RENAMER_SPEECH_ENDPOINT).
    #[arg(long)]
    speech_endpoint: Option<String>,

    /// Seconds of audio to record per listen.
    #[arg(long)]
    clip_secs: Option<u32>,

    /// Recorder program taking `arecord` flags.
    #[arg(long)]
    recorder: Option<String>,

    /// Seconds to wait for the speech service.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Increase log verbosity in the log pane (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn voice_config(&self) -> VoiceConfig {
        let mut config = VoiceConfig::from_env();
        if let Some(ref endpoint) = self.speech_endpoint {
            config.endpoint = Some(endpoint.clone());
        }
        if let Some(secs) = self.clip_secs {
            config.clip_secs = secs;
        }
        if let Some(ref recorder) = self.recorder {
            config.recorder = recorder.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = RenamerConfig::new(&cli.workdir, cli.verbose.saturating_add(1));
    let voice_config = cli.voice_config();

    let transcriber = match HttpTranscriber::new(&voice_config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // Set up tracing → screen log buffer.
    let (tracing_layer, log_buffer) = UiTracingLayer::new();
    tracing_subscriber::registry()
        .with(config.level_filter())
        .with(tracing_layer)
        .init();

    let ui_state = Arc::new(Mutex::new(UiState::default()));

    let listener = Listener {
        recorder: Arc::new(CommandRecorder::from_config(&voice_config)),
        transcriber: Arc::new(transcriber),
        timeout: voice_config.request_timeout,
    };
    let worker = tokio::spawn(listener.run(ui_state.clone()));

    let tui_config = TuiConfig {
        start_dir: config.workdir.clone(),
        voice: true,
        log_buffer: Some(log_buffer),
    };
    let tui_handle = spawn_tui(ui_state.clone(), tui_config);

    let result = match tokio::task::spawn_blocking(move || tui_handle.join()).await {
        Ok(Ok(result)) => result,
        _ => Err(io::Error::other("screen thread panicked")),
    };

    request_quit(&ui_state);
    worker.await.ok();

    match result {
        Ok(summary) => {
            info!(succeeded = summary.succeeded, failed = summary.failed, "session finished");
            if summary.succeeded + summary.failed > 0 {
                println!("{} renamed, {} failed.", summary.succeeded, summary.failed);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
