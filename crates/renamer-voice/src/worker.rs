//! Background listener.
//!
//! The screen thread only flips `listen_requested`; this task does the slow
//! part (recording, then transcription) and writes the result back into
//! [`UiState::voice`](renamer::ui::UiState::voice). Nothing here touches the
//! filesystem entry being renamed.

use std::sync::Arc;
use std::time::Duration;

use renamer::ui::{
    ActivityKind, SharedUiState, VoiceInput, push_activity, quit_requested, set_voice,
    take_listen_request,
};
use tracing::{info, warn};

use crate::capture::Recorder;
use crate::speech::{SpeechError, Transcriber};

/// How often the worker checks for a listen or quit request.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Collaborators and limits for the listening worker.
#[derive(Clone)]
pub struct Listener {
    pub recorder: Arc<dyn Recorder>,
    pub transcriber: Arc<dyn Transcriber>,
    /// Upper bound on one transcription. No retries on expiry.
    pub timeout: Duration,
}

impl Listener {
    /// Record one clip and transcribe it.
    pub async fn listen_once(&self) -> Result<String, SpeechError> {
        let wav = self.recorder.record().await?;
        match tokio::time::timeout(self.timeout, self.transcriber.transcribe(wav)).await {
            Ok(result) => result,
            Err(_) => Err(SpeechError::Unreachable(format!(
                "no answer within {:.0} seconds",
                self.timeout.as_secs_f64()
            ))),
        }
    }

    /// Serve listen requests until the session ends.
    pub async fn run(self, state: SharedUiState) {
        info!("voice listener started");
        loop {
            if quit_requested(&state) {
                break;
            }
            if !take_listen_request(&state) {
                tokio::time::sleep(POLL_INTERVAL).await;
                continue;
            }

            let result = self.listen_once().await;
            if quit_requested(&state) {
                break;
            }
            report(&state, result);
        }
        info!("voice listener stopped");
    }
}

/// Publish a listening result to the screen.
fn report(state: &SharedUiState, result: Result<String, SpeechError>) {
    match result {
        Ok(text) => {
            info!(transcript = %text, "speech recognized");
            push_activity(state, ActivityKind::Success, &format!("Recognized: '{text}'"));
            set_voice(state, VoiceInput::Recognized(text));
        }
        Err(e) => {
            warn!(error = %e, "speech recognition failed");
            push_activity(state, ActivityKind::Error, &format!("Error: {e}"));
            set_voice(state, VoiceInput::Failed(e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::RecordFuture;
    use crate::speech::TranscribeFuture;
    use renamer::ui::{UiState, request_listen, request_quit};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct FixedRecorder(Result<Vec<u8>, SpeechError>);

    impl Recorder for FixedRecorder {
        fn record(&self) -> RecordFuture<'_> {
            let result = self.0.clone();
            Box::pin(async move { result })
        }
    }

    /// Replays queued results; counts calls.
    #[derive(Default)]
    struct ScriptedTranscriber {
        replies: Mutex<VecDeque<Result<String, SpeechError>>>,
        delay: Option<Duration>,
    }

    impl ScriptedTranscriber {
        fn replying(replies: Vec<Result<String, SpeechError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                delay: None,
            }
        }
    }

    impl Transcriber for ScriptedTranscriber {
        fn transcribe(&self, wav: Vec<u8>) -> TranscribeFuture<'_> {
            assert!(!wav.is_empty());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(SpeechError::Unrecognized));
            let delay = self.delay;
            Box::pin(async move {
                if let Some(d) = delay {
                    tokio::time::sleep(d).await;
                }
                reply
            })
        }
    }

    fn listener(recorder: FixedRecorder, transcriber: ScriptedTranscriber) -> Listener {
        Listener {
            recorder: Arc::new(recorder),
            transcriber: Arc::new(transcriber),
            timeout: Duration::from_secs(5),
        }
    }

    fn shared() -> SharedUiState {
        Arc::new(Mutex::new(UiState::default()))
    }

    async fn wait_for_voice(state: &SharedUiState, pred: impl Fn(&VoiceInput) -> bool) {
        for _ in 0..100 {
            if pred(&state.lock().unwrap().voice) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("voice state never changed: {:?}", state.lock().unwrap().voice);
    }

    #[tokio::test]
    async fn listen_once_returns_transcript() {
        let l = listener(
            FixedRecorder(Ok(vec![1, 2, 3])),
            ScriptedTranscriber::replying(vec![Ok("report final".into())]),
        );
        assert_eq!(l.listen_once().await, Ok("report final".to_string()));
    }

    #[tokio::test]
    async fn capture_failure_skips_transcription() {
        let l = listener(
            FixedRecorder(Err(SpeechError::Capture("no mic".into()))),
            ScriptedTranscriber::replying(vec![Ok("never".into())]),
        );
        assert_eq!(l.listen_once().await, Err(SpeechError::Capture("no mic".into())));
    }

    #[tokio::test]
    async fn slow_service_times_out_without_retry() {
        let transcriber = ScriptedTranscriber {
            replies: Mutex::new(vec![Ok("late".to_string())].into()),
            delay: Some(Duration::from_secs(2)),
        };
        let l = Listener {
            timeout: Duration::from_millis(20),
            ..listener(FixedRecorder(Ok(vec![1])), transcriber)
        };
        assert!(matches!(l.listen_once().await, Err(SpeechError::Unreachable(_))));
    }

    #[tokio::test]
    async fn worker_serves_requests_until_quit() {
        let state = shared();
        let l = listener(
            FixedRecorder(Ok(vec![1])),
            ScriptedTranscriber::replying(vec![
                Ok("first draft".into()),
                Err(SpeechError::Service("HTTP 503".into())),
            ]),
        );
        let handle = tokio::spawn(l.run(state.clone()));

        assert!(request_listen(&state));
        wait_for_voice(&state, |v| matches!(v, VoiceInput::Recognized(_))).await;
        assert_eq!(state.lock().unwrap().voice.transcript(), Some("first draft"));

        assert!(request_listen(&state));
        wait_for_voice(&state, |v| matches!(v, VoiceInput::Failed(_))).await;
        assert_eq!(
            state.lock().unwrap().activity.last().unwrap().message,
            "Error: Speech service error: HTTP 503"
        );

        request_quit(&state);
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[test]
    fn report_success_sets_transcript() {
        let state = shared();
        report(&state, Ok("notes".into()));
        let s = state.lock().unwrap();
        assert_eq!(s.voice, VoiceInput::Recognized("notes".into()));
        assert_eq!(s.activity.last().unwrap().message, "Recognized: 'notes'");
    }
}
