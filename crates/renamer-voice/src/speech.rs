//! Speech-to-text collaborator.
//!
//! The listening worker only sees the [`Transcriber`] trait. The shipped
//! [`HttpTranscriber`] POSTs a WAV clip to a configurable endpoint and
//! expects `{"text": "..."}` back.
//!
//! Every way this can go wrong is a [`SpeechError`]. Speech errors are
//! reported on screen and never turned into a rename request.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use serde::Deserialize;
use tracing::debug;

use crate::config::VoiceConfig;

/// Why no transcript was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// The microphone clip could not be recorded.
    Capture(String),
    /// The speech service could not be reached or did not answer in time.
    Unreachable(String),
    /// The service answered but heard nothing usable.
    Unrecognized,
    /// The service answered with an error or an unreadable body.
    Service(String),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture(detail) => write!(f, "Could not record audio: {detail}"),
            Self::Unreachable(detail) => write!(f, "Speech service unreachable: {detail}"),
            Self::Unrecognized => write!(f, "Could not understand audio"),
            Self::Service(detail) => write!(f, "Speech service error: {detail}"),
        }
    }
}

/// Boxed future returned by [`Transcriber::transcribe`].
pub type TranscribeFuture<'a> = Pin<Box<dyn Future<Output = Result<String, SpeechError>> + Send + 'a>>;

/// Turns a recorded WAV clip into text.
///
/// Implementations return the raw transcript; sanitizing it into a file
/// name happens later in `RenameRequest::from_transcript`.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, wav: Vec<u8>) -> TranscribeFuture<'_>;
}

#[derive(Deserialize)]
struct TranscriptResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Extract the transcript from a response body. Blank text means the
/// service heard nothing.
pub(crate) fn parse_transcript(body: &str) -> Result<String, SpeechError> {
    let parsed: TranscriptResponse = serde_json::from_str(body)
        .map_err(|e| SpeechError::Service(format!("failed to parse response: {e}")))?;
    match parsed.text {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(SpeechError::Unrecognized),
    }
}

/// [`Transcriber`] backed by an HTTP speech-to-text endpoint.
pub struct HttpTranscriber {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTranscriber {
    /// Build a client for `config.endpoint`.
    pub fn new(config: &VoiceConfig) -> Result<Self, String> {
        let endpoint = config.endpoint.clone().ok_or_else(|| {
            format!(
                "no speech endpoint configured (use --speech-endpoint or {})",
                crate::config::ENDPOINT_ENV
            )
        })?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("renamer-voice/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    async fn post(&self, wav: Vec<u8>) -> Result<String, SpeechError> {
        let bytes = wav.len();
        let start = Instant::now();

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "audio/wav")
            .body(wav);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SpeechError::Unreachable(format!("request failed: {e}")))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| SpeechError::Unreachable(format!("failed to read response: {e}")))?;

        debug!(
            "speech response: HTTP {} in {:.1}s ({} bytes sent, {} received)",
            status,
            start.elapsed().as_secs_f64(),
            bytes,
            text.len()
        );

        if !status.is_success() {
            return Err(SpeechError::Service(format!("HTTP {status}: {text}")));
        }
        parse_transcript(&text)
    }
}

impl Transcriber for HttpTranscriber {
    fn transcribe(&self, wav: Vec<u8>) -> TranscribeFuture<'_> {
        Box::pin(self.post(wav))
    }
}
