//! Speech coordinator: mute state and the single active utterance.
//!
//! All speech goes through [`SpeechCoordinator`], which mediates calls into a
//! [`SpeechSynth`] capability. The invariant is at most one utterance in
//! flight: every start is preceded by a cancel of whatever was speaking, and
//! mute suppresses starts entirely. Speech is fire-and-forget: a failing or
//! absent engine degrades silently and the visual chat keeps working.

use crate::error::MitraResult;
use tracing::debug;

/// Locale used when the caller does not select a language.
pub const DEFAULT_LANG: &str = "hi-IN";

/// One synthesized-speech playback request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// BCP-47 tag, e.g. `hi-IN`.
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    /// Utterance with fixed rate and pitch of 1.0, defaulting to [`DEFAULT_LANG`].
    pub fn new(text: impl Into<String>, lang: Option<&str>) -> Self {
        Self {
            text: text.into(),
            lang: lang.unwrap_or(DEFAULT_LANG).to_string(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

/// Speech-synthesis capability. Implementations must make `cancel` stop any
/// utterance previously started with `speak`, immediately.
pub trait SpeechSynth: Send + Sync {
    fn speak(&self, utterance: &Utterance) -> MitraResult<()>;
    fn cancel(&self);
}

/// Engine that swallows everything. The degraded path when no real
/// synthesizer is available.
#[derive(Debug, Default)]
pub struct NullSpeech;

impl SpeechSynth for NullSpeech {
    fn speak(&self, _utterance: &Utterance) -> MitraResult<()> {
        Ok(())
    }

    fn cancel(&self) {}
}

/// Owns mute state and mediates every call into the speech capability.
pub struct SpeechCoordinator {
    muted: bool,
    engine: Option<Box<dyn SpeechSynth>>,
}

impl SpeechCoordinator {
    /// Coordinator over a probed engine; `None` means speech is unavailable
    /// and every operation silently no-ops.
    pub fn new(engine: Option<Box<dyn SpeechSynth>>) -> Self {
        Self {
            muted: false,
            engine,
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Flip mute and return the new state. Entering mute cancels any
    /// in-flight utterance; the caller updates its own mute indicator.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.cancel();
        }
        self.muted
    }

    /// Start speaking `text`, cancelling whatever was speaking first.
    /// No-op while muted or when the capability is absent.
    pub fn speak(&self, text: &str, lang: Option<&str>) {
        if self.muted {
            return;
        }
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        engine.cancel();
        let utterance = Utterance::new(text, lang);
        if let Err(e) = engine.speak(&utterance) {
            debug!("speech synthesis failed, continuing without audio: {e}");
        }
    }

    /// Unconditionally stop any active utterance.
    pub fn cancel(&self) {
        if let Some(engine) = self.engine.as_ref() {
            engine.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Start(String, String),
        Cancel,
    }

    #[derive(Clone, Default)]
    struct RecordingSynth {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl SpeechSynth for RecordingSynth {
        fn speak(&self, utterance: &Utterance) -> MitraResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Start(utterance.text.clone(), utterance.lang.clone()));
            Ok(())
        }

        fn cancel(&self) {
            self.calls.lock().unwrap().push(Call::Cancel);
        }
    }

    #[test]
    fn speak_cancels_previous_utterance_first() {
        let synth = RecordingSynth::default();
        let calls = synth.calls.clone();
        let coordinator = SpeechCoordinator::new(Some(Box::new(synth)));

        coordinator.speak("one", None);
        coordinator.speak("two", None);

        let calls = calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                Call::Cancel,
                Call::Start("one".into(), DEFAULT_LANG.into()),
                Call::Cancel,
                Call::Start("two".into(), DEFAULT_LANG.into()),
            ]
        );
    }

    #[test]
    fn muted_coordinator_never_starts_an_utterance() {
        let synth = RecordingSynth::default();
        let calls = synth.calls.clone();
        let mut coordinator = SpeechCoordinator::new(Some(Box::new(synth)));

        assert!(coordinator.toggle_mute());
        coordinator.speak("ignored", None);
        coordinator.speak("also ignored", Some("en-IN"));

        // Only the cancel from entering mute; no starts.
        assert_eq!(*calls.lock().unwrap(), vec![Call::Cancel]);
    }

    #[test]
    fn unmuting_restores_speech() {
        let synth = RecordingSynth::default();
        let calls = synth.calls.clone();
        let mut coordinator = SpeechCoordinator::new(Some(Box::new(synth)));

        coordinator.toggle_mute();
        assert!(!coordinator.toggle_mute());
        coordinator.speak("back", Some("en-IN"));

        let calls = calls.lock().unwrap();
        assert_eq!(
            calls.last(),
            Some(&Call::Start("back".into(), "en-IN".into()))
        );
    }

    #[test]
    fn missing_engine_degrades_silently() {
        let mut coordinator = SpeechCoordinator::new(None);
        coordinator.speak("nobody listening", None);
        coordinator.cancel();
        coordinator.toggle_mute();
    }

    #[test]
    fn utterance_uses_fixed_rate_and_pitch() {
        let utterance = Utterance::new("text", None);
        assert_eq!(utterance.rate, 1.0);
        assert_eq!(utterance.pitch, 1.0);
        assert_eq!(utterance.lang, DEFAULT_LANG);
    }
}
