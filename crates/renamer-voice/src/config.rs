//! Voice front-end configuration with sensible defaults.
//!
//! [`VoiceConfig`] starts from [`Default`], picks up the speech service
//! settings from the environment via [`from_env`](VoiceConfig::from_env),
//! and is then overridden by command-line flags.

use std::time::Duration;

/// Environment variable holding the speech-to-text endpoint URL.
pub const ENDPOINT_ENV: &str = "RENAMER_SPEECH_ENDPOINT";
/// Environment variable holding the speech service API key.
pub const API_KEY_ENV: &str = "RENAMER_SPEECH_KEY";

/// Settings for recording and transcribing one spoken file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceConfig {
    /// Speech-to-text endpoint. Default: unset (required to run).
    pub endpoint: Option<String>,
    /// Bearer key for the endpoint. Default: unset (no auth header).
    pub api_key: Option<String>,
    /// Length of each recorded clip in seconds. Default: `5`.
    pub clip_secs: u32,
    /// Recorder program, called with `arecord`-compatible flags.
    /// Default: `"arecord"`.
    pub recorder: String,
    /// Upper bound on one transcription request. Default: 15 seconds.
    pub request_timeout: Duration,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            clip_secs: 5,
            recorder: "arecord".to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl VoiceConfig {
    /// Defaults plus the endpoint and key from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults plus whatever `lookup` returns for the environment keys.
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            endpoint: non_blank(ENDPOINT_ENV),
            api_key: non_blank(API_KEY_ENV),
            ..Default::default()
        }
    }
}
