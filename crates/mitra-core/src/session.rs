//! Chat session controller.
//!
//! Orchestrates one question end to end: append the user entry and a pending
//! bot entry, issue exactly one request, then resolve the pending entry with
//! rendered markup (or a failure string) and hand the cleaned text to the
//! speech coordinator. Each submit owns its own pending handle, so concurrent
//! submits resolve independently, in whatever order their responses arrive.
//!
//! The session also owns the open/closed state of the chat surface and the
//! single-slot question stashed by the page's "ask the assistant" affordance
//! before the surface was opened.

use crate::client::{AskOutcome, QaBackend};
use crate::markup;
use crate::speech::SpeechCoordinator;
use crate::transcript::{ConversationLog, Sender};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Shown when the server refuses a question without its own fallback text.
pub const AI_FAILURE_MESSAGE: &str = "क्षमा करें, AI से कनेक्ट करने में समस्या हुई।";

/// Shown when the request produced no usable response at all.
pub const CONNECTIVITY_FAILURE_MESSAGE: &str = "क्षमा करें, सर्वर से कनेक्ट नहीं हो पा रहा है।";

/// Lifecycle of the most recent submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    Sending,
    Resolved,
    Failed,
}

struct SessionState {
    log: ConversationLog,
    speech: SpeechCoordinator,
    open: bool,
    pending_question: Option<String>,
    lang: Option<String>,
    phase: ChatPhase,
}

/// The chat session controller. Methods take `&self`; state lives behind a
/// lock that is never held across the network await, so overlapping submits
/// from separate tasks interleave exactly like the event-loop original.
pub struct ChatSession {
    state: Mutex<SessionState>,
    backend: Arc<dyn QaBackend>,
}

impl ChatSession {
    pub fn new(
        log: ConversationLog,
        speech: SpeechCoordinator,
        backend: Arc<dyn QaBackend>,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState {
                log,
                speech,
                open: false,
                pending_question: None,
                lang: None,
                phase: ChatPhase::Idle,
            }),
            backend,
        }
    }

    /// Mark the chat surface visible and consume the stashed question, if one
    /// was asked before the surface opened.
    pub async fn open(&self) {
        let stashed = {
            let mut st = self.state.lock().await;
            st.open = true;
            st.pending_question.take()
        };
        if let Some(question) = stashed {
            self.submit(&question).await;
        }
    }

    /// Hide the chat surface. Closing always stops any speech in progress,
    /// regardless of mute state.
    pub async fn close(&self) {
        let mut st = self.state.lock().await;
        st.open = false;
        st.speech.cancel();
    }

    pub async fn is_open(&self) -> bool {
        self.state.lock().await.open
    }

    /// The page-level "ask the assistant" affordance: submit directly when the
    /// surface is open, otherwise stash the question and open (which consumes
    /// the slot exactly once).
    pub async fn ask(&self, question: &str) {
        let already_open = { self.state.lock().await.open };
        if already_open {
            self.submit(question).await;
        } else {
            {
                let mut st = self.state.lock().await;
                st.pending_question = Some(question.to_string());
            }
            self.open().await;
        }
    }

    /// Language used for spoken replies; `None` falls back to the fixed
    /// default locale.
    pub async fn set_language(&self, lang: Option<String>) {
        self.state.lock().await.lang = lang;
    }

    /// Flip the mute toggle, returning the new state.
    pub async fn toggle_mute(&self) -> bool {
        self.state.lock().await.speech.toggle_mute()
    }

    pub async fn phase(&self) -> ChatPhase {
        self.state.lock().await.phase
    }

    /// Snapshot of the conversation log entries.
    pub async fn entries(&self) -> Vec<crate::transcript::Message> {
        self.state.lock().await.log.entries().to_vec()
    }

    /// Send one question: guard empty input, append the user entry and a
    /// pending bot entry, issue the request, resolve and speak the result.
    pub async fn submit(&self, question: &str) {
        let question = question.trim();
        if question.is_empty() {
            return;
        }

        let (handle, lang) = {
            let mut st = self.state.lock().await;
            // Without a display surface the whole chat is disabled.
            if !st.log.has_surface() {
                return;
            }
            st.log.append_final(Sender::User, question);
            let handle = st.log.append_pending(Sender::Bot);
            st.phase = ChatPhase::Sending;
            (handle, st.lang.clone())
        };

        let outcome = self.backend.ask(question).await;

        let mut st = self.state.lock().await;
        match outcome {
            Ok(AskOutcome::Answered { answer }) => {
                if let Some(h) = handle {
                    st.log.resolve(h, &markup::render_inline(&answer));
                }
                st.speech
                    .speak(&markup::strip_for_speech(&answer), lang.as_deref());
                st.phase = ChatPhase::Resolved;
            }
            Ok(AskOutcome::Refused { fallback }) => {
                let message = fallback.unwrap_or_else(|| AI_FAILURE_MESSAGE.to_string());
                info!("assistant refused the question, showing fallback");
                // Failure text is displayed as-is, never markdown-processed.
                if let Some(h) = handle {
                    st.log.resolve(h, &markup::escape_text(&message));
                }
                st.speech.speak(&message, lang.as_deref());
                st.phase = ChatPhase::Failed;
            }
            Err(e) => {
                warn!("ask-ai request failed: {e}");
                if let Some(h) = handle {
                    st.log.resolve(h, CONNECTIVITY_FAILURE_MESSAGE);
                }
                st.speech.speak(CONNECTIVITY_FAILURE_MESSAGE, lang.as_deref());
                st.phase = ChatPhase::Failed;
            }
        }
    }
}
