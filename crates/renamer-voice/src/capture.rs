//! Microphone capture.

use std::future::Future;
use std::pin::Pin;

use tokio::process::Command;
use tracing::debug;

use crate::config::VoiceConfig;
use crate::speech::SpeechError;

/// Boxed future returned by [`Recorder::record`].
pub type RecordFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, SpeechError>> + Send + 'a>>;

/// Records one clip and returns it as WAV bytes.
pub trait Recorder: Send + Sync {
    fn record(&self) -> RecordFuture<'_>;
}

/// [`Recorder`] that runs an external program (`arecord` by default) to
/// write a 16 kHz mono WAV into a temporary file.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    program: String,
    clip_secs: u32,
}

impl CommandRecorder {
    pub fn new(program: impl Into<String>, clip_secs: u32) -> Self {
        Self {
            program: program.into(),
            clip_secs: clip_secs.max(1),
        }
    }

    pub fn from_config(config: &VoiceConfig) -> Self {
        Self::new(config.recorder.clone(), config.clip_secs)
    }

    async fn capture(&self) -> Result<Vec<u8>, SpeechError> {
        let file = tempfile::Builder::new()
            .prefix("renamer-clip-")
            .suffix(".wav")
            .tempfile()
            .map_err(|e| SpeechError::Capture(format!("cannot create temp file: {e}")))?;

        let output = Command::new(&self.program)
            .args(["-q", "-f", "S16_LE", "-r", "16000", "-c", "1", "-d"])
            .arg(self.clip_secs.to_string())
            .arg(file.path())
            .output()
            .await
            .map_err(|e| SpeechError::Capture(format!("cannot run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Capture(format!(
                "{} failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let wav = tokio::fs::read(file.path())
            .await
            .map_err(|e| SpeechError::Capture(format!("cannot read clip: {e}")))?;
        if wav.is_empty() {
            return Err(SpeechError::Capture("recorder produced no audio".to_string()));
        }
        debug!(bytes = wav.len(), secs = self.clip_secs, "recorded clip");
        Ok(wav)
    }
}

impl Recorder for CommandRecorder {
    fn record(&self) -> RecordFuture<'_> {
        Box::pin(self.capture())
    }
}
