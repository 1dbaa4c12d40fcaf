//! Voice front-end for the renamer protocol.
//!
//! `renamer-voice` runs the terminal file browser in voice mode and a
//! background [`Listener`] that records a clip and sends it to a
//! speech-to-text service. The recognized text becomes the new file name
//! once the user confirms with `r`.
//!
//! # Library usage
//!
//! Plug a different speech service in by implementing [`Transcriber`]:
//!
//! ```ignore
//! use renamer_voice::{CommandRecorder, Listener, VoiceConfig};
//! use std::sync::Arc;
//!
//! let config = VoiceConfig::from_env();
//! let listener = Listener {
//!     recorder: Arc::new(CommandRecorder::from_config(&config)),
//!     transcriber: Arc::new(MyTranscriber::new()),
//!     timeout: config.request_timeout,
//! };
//! tokio::spawn(listener.run(state.clone()));
//! ```
//!
//! # Binary
//!
//! ```sh
//! RENAMER_SPEECH_ENDPOINT=http://localhost:9000/stt rename-voice --workdir ~/notes
//! ```

pub mod capture;
pub mod config;
pub mod speech;
pub mod worker;

pub use capture::{CommandRecorder, Recorder};
pub use config::VoiceConfig;
pub use speech::{HttpTranscriber, SpeechError, Transcriber};
pub use worker::Listener;
