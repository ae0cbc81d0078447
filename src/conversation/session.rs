use anyhow::{Result, anyhow};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use super::settings::{SessionSettings, validate_max_tokens};
use super::transcript::{Message, Transcript};
use crate::api::{ApiReply, MessagesApi, MessagesRequest, UNEXPECTED_FORMAT_MESSAGE, validate_model};
use crate::clipboard::Clipboard;

/// How long `copied_index` keeps reporting a copied message.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Why a send was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The draft was empty or whitespace.
    EmptyDraft,
    /// Another request is still in flight.
    Busy,
}

/// Result of one `send_turn` call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum TurnOutcome {
    /// Nothing was appended and no call was made.
    Rejected(Rejection),
    /// The assistant replied with this text.
    Reply(String),
    /// The API answered with an error object; holds the user-facing message.
    ApiError(String),
    /// The call itself failed; holds the "Connection error: ..." message.
    ConnectionError(String),
    /// The body was neither a reply nor an error. Only the user entry was appended.
    UnexpectedFormat,
}

#[derive(Debug)]
struct SessionState {
    transcript: Transcript,
    draft: String,
    settings: SessionSettings,
    last_error: Option<String>,
    copied: Option<(usize, Instant)>,
}

impl SessionState {
    fn request(&self) -> MessagesRequest {
        MessagesRequest {
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            system: self.settings.system_prompt.clone(),
            messages: self.transcript.outbound(),
        }
    }

    fn fail_inline(&mut self, message: &str) {
        self.last_error = Some(message.to_string());
        self.transcript.push(Message::warning(message));
    }
}

/// Clears the in-flight flag when dropped, so every exit path releases it.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One conversation: the transcript, its settings and the single in-flight slot.
///
/// All methods take `&self`; a send that overlaps another one is rejected
/// rather than queued.
pub struct Session<A> {
    api: A,
    state: Mutex<SessionState>,
    in_flight: AtomicBool,
}

impl<A: MessagesApi> Session<A> {
    pub fn new(api: A, settings: SessionSettings) -> Self {
        Self {
            api,
            state: Mutex::new(SessionState {
                transcript: Transcript::new(),
                draft: String::new(),
                settings,
                last_error: None,
                copied: None,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends `draft` as the next user turn and records the outcome.
    ///
    /// Empty drafts and sends made while another request is pending are
    /// rejected without touching the transcript.
    pub async fn send_turn(&self, draft: &str) -> TurnOutcome {
        if draft.trim().is_empty() {
            trace!("ignoring empty draft");
            return TurnOutcome::Rejected(Rejection::EmptyDraft);
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("request already in flight, ignoring send");
            return TurnOutcome::Rejected(Rejection::Busy);
        };

        let (request, throttle) = {
            let mut state = self.state();
            state.transcript.push(Message::user(draft));
            state.draft.clear();
            state.last_error = None;
            (state.request(), state.settings.throttle)
        };

        if !throttle.is_zero() {
            trace!(?throttle, "pacing outbound request");
            tokio::time::sleep(throttle).await;
        }

        let result = self.api.create_message(&request).await;
        self.record(result)
    }

    /// Sends the stored draft.
    pub async fn send_draft(&self) -> TurnOutcome {
        let draft = self.draft();
        self.send_turn(&draft).await
    }

    fn record(&self, result: Result<Value>) -> TurnOutcome {
        let mut state = self.state();

        match result {
            Ok(body) => match ApiReply::classify(&body) {
                ApiReply::Content(text) => {
                    debug!(chars = text.len(), "assistant replied");
                    state.transcript.push(Message::assistant(text.clone()));
                    state.last_error = None;
                    TurnOutcome::Reply(text)
                }
                ApiReply::Error(error) => {
                    let message = error.user_message();
                    warn!(
                        error_type = error.error_type.as_deref().unwrap_or("unknown"),
                        rate_limited = error.is_rate_limited(),
                        "API returned an error: {message}"
                    );
                    state.fail_inline(&message);
                    TurnOutcome::ApiError(message)
                }
                ApiReply::Unexpected => {
                    warn!(%body, "unexpected API response format");
                    state.last_error = Some(UNEXPECTED_FORMAT_MESSAGE.to_string());
                    TurnOutcome::UnexpectedFormat
                }
            },
            Err(e) => {
                let message = format!("Connection error: {e:#}");
                warn!("{message}");
                state.fail_inline(&message);
                TurnOutcome::ConnectionError(message)
            }
        }
    }

    /// Resets the transcript to the seed message and clears the stored error.
    pub fn clear(&self) {
        let mut state = self.state();
        state.transcript.reset();
        state.last_error = None;
        state.copied = None;
        debug!("session cleared");
    }

    /// Copies the content of the message at `index` to `clipboard`.
    pub fn copy_message<C: Clipboard + ?Sized>(&self, index: usize, clipboard: &mut C) -> Result<()> {
        let content = self
            .state()
            .transcript
            .get(index)
            .map(|m| m.content().to_string())
            .ok_or_else(|| anyhow!("No message at position {}", index.saturating_add(1)))?;

        clipboard.set_text(&content)?;
        self.state().copied = Some((index, Instant::now()));
        Ok(())
    }

    /// Index of the most recently copied message, for two seconds after the copy.
    pub fn copied_index(&self) -> Option<usize> {
        self.copied_index_at(Instant::now())
    }

    fn copied_index_at(&self, now: Instant) -> Option<usize> {
        self.state()
            .copied
            .filter(|(_, at)| now.saturating_duration_since(*at) < COPY_FEEDBACK)
            .map(|(index, _)| index)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn transcript(&self) -> Transcript {
        self.state().transcript.clone()
    }

    pub fn message_count(&self) -> usize {
        self.state().transcript.len()
    }

    pub fn last_message(&self) -> Option<Message> {
        self.state().transcript.last().cloned()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state().last_error.clone()
    }

    pub fn dismiss_error(&self) {
        self.state().last_error = None;
    }

    pub fn draft(&self) -> String {
        self.state().draft.clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.state().draft = text.into();
    }

    pub fn settings(&self) -> SessionSettings {
        self.state().settings.clone()
    }

    pub fn set_model(&self, model: &str) -> Result<()> {
        validate_model(model)?;
        self.state().settings.model = model.to_string();
        Ok(())
    }

    pub fn set_system_prompt(&self, prompt: impl Into<String>) {
        self.state().settings.system_prompt = prompt.into();
    }

    pub fn set_max_tokens(&self, max_tokens: u32) -> Result<()> {
        validate_max_tokens(max_tokens)?;
        self.state().settings.max_tokens = max_tokens;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::conversation::SEED_MESSAGE;
    use serde_json::json;
    use std::future::Future;

    struct FixedApi(Value);

    impl MessagesApi for FixedApi {
        async fn create_message(&self, _request: &MessagesRequest) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    /// Never resolves; used to observe the session mid-request.
    struct PendingApi;

    impl MessagesApi for PendingApi {
        fn create_message(
            &self,
            _request: &MessagesRequest,
        ) -> impl Future<Output = Result<Value>> + Send {
            std::future::pending()
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Vec<String>,
    }

    impl Clipboard for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn unthrottled() -> SessionSettings {
        SessionSettings {
            throttle: Duration::ZERO,
            ..SessionSettings::default()
        }
    }

    #[test]
    fn test_in_flight_guard_is_exclusive() {
        let flag = AtomicBool::new(false);

        let guard = InFlightGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn test_dropped_send_releases_flag() {
        let session = Session::new(PendingApi, unthrottled());

        {
            let send = session.send_turn("hello");
            tokio::pin!(send);
            let polled = tokio::time::timeout(Duration::from_millis(10), &mut send).await;
            assert!(polled.is_err());
            assert!(session.is_in_flight());
        }

        assert!(!session.is_in_flight());
        assert_eq!(session.message_count(), 2);
    }

    #[tokio::test]
    async fn test_send_clears_draft() {
        let session = Session::new(FixedApi(json!({"content": [{"text": "hi"}]})), unthrottled());
        session.set_draft("hello");
        assert_eq!(session.draft(), "hello");

        let outcome = session.send_draft().await;

        assert_eq!(outcome, TurnOutcome::Reply("hi".to_string()));
        assert_eq!(session.draft(), "");
    }

    #[tokio::test]
    async fn test_rejected_send_keeps_draft() {
        let session = Session::new(FixedApi(json!({})), unthrottled());
        session.set_draft("   ");

        let outcome = session.send_draft().await;

        assert_eq!(outcome, TurnOutcome::Rejected(Rejection::EmptyDraft));
        assert_eq!(session.draft(), "   ");
    }

    #[tokio::test]
    async fn test_next_send_clears_previous_error() {
        let session = Session::new(FixedApi(json!({"content": [{"text": "ok"}]})), unthrottled());
        session.state().last_error = Some("stale".to_string());

        let _ = session.send_turn("again").await;

        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_dismiss_error() {
        let session = Session::new(FixedApi(json!({})), unthrottled());
        session.state().last_error = Some("boom".to_string());

        session.dismiss_error();

        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_settings_setters_validate() {
        let session = Session::new(FixedApi(json!({})), unthrottled());

        assert!(session.set_model("claude-opus-4-20250514").is_ok());
        assert!(session.set_model("unknown").is_err());
        assert!(session.set_max_tokens(8000).is_ok());
        assert!(session.set_max_tokens(50).is_err());
        session.set_system_prompt("Be terse.");

        let settings = session.settings();
        assert_eq!(settings.model, "claude-opus-4-20250514");
        assert_eq!(settings.max_tokens, 8000);
        assert_eq!(settings.system_prompt, "Be terse.");
    }

    #[test]
    fn test_clear_keeps_settings() {
        let session = Session::new(FixedApi(json!({})), unthrottled());
        session.set_system_prompt("Custom");

        session.clear();

        assert_eq!(session.settings().system_prompt, "Custom");
    }

    #[test]
    fn test_copy_message_records_feedback() {
        let session = Session::new(FixedApi(json!({})), unthrottled());
        let mut clipboard = RecordingClipboard::default();

        session.copy_message(0, &mut clipboard).unwrap();

        assert_eq!(clipboard.copied, vec![SEED_MESSAGE.to_string()]);
        assert_eq!(session.copied_index(), Some(0));
    }

    #[test]
    fn test_copy_feedback_expires() {
        let session = Session::new(FixedApi(json!({})), unthrottled());
        let mut clipboard = RecordingClipboard::default();
        session.copy_message(0, &mut clipboard).unwrap();

        let later = Instant::now() + COPY_FEEDBACK + Duration::from_millis(1);
        assert_eq!(session.copied_index_at(later), None);
    }

    #[test]
    fn test_copy_out_of_range() {
        let session = Session::new(FixedApi(json!({})), unthrottled());
        let mut clipboard = RecordingClipboard::default();

        let result = session.copy_message(3, &mut clipboard);

        assert!(result.is_err());
        assert!(clipboard.copied.is_empty());
        assert_eq!(session.copied_index(), None);

        let Err(err) = session.copy_message(usize::MAX, &mut clipboard) else {
            panic!("expected an out-of-range error");
        };
        assert!(err.to_string().contains(&usize::MAX.to_string()));
        assert!(clipboard.copied.is_empty());
    }
}
