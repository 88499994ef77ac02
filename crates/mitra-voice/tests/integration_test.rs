//! Integration tests for the speech engine.
//!
//! Note: tests that open an audio device are ignored by default since CI
//! environments usually have none.

use mitra_core::{SpeechSynth, Utterance};
use mitra_voice::{create_best_engine, PlaceholderTts, RodioSpeech, TtsBackend};

#[test]
fn placeholder_backend_never_produces_audio() {
    let tts = PlaceholderTts;
    let utterance = Utterance::new("मौसम साफ है", Some("hi-IN"));
    assert!(tts.synthesize(&utterance).unwrap().is_empty());
}

#[test]
#[ignore] // Requires an audio output device
fn engine_accepts_speak_and_cancel() {
    let engine = RodioSpeech::new(Box::new(PlaceholderTts)).expect("audio device");
    let utterance = Utterance::new("परीक्षण", None);
    engine.speak(&utterance).expect("queue job");
    engine.cancel();
    engine.speak(&utterance).expect("queue after cancel");
    engine.cancel();
}

#[test]
#[ignore] // Requires an audio output device
fn probing_finds_an_engine_when_a_device_exists() {
    assert!(create_best_engine().is_some());
}
