//! # Mitra Voice - speech synthesis for the Krishi Mitra assistant
//!
//! Concrete implementations of the `SpeechSynth` capability consumed by the
//! chat core's speech coordinator.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      RodioSpeech                         │
//! │  ┌──────────────┐   ┌──────────────┐   ┌─────────────┐  │
//! │  │  Job queue   │ → │  TtsBackend  │ → │  Playback   │  │
//! │  │ (generation) │   │ (HTTP / stub)│   │   (rodio)   │  │
//! │  └──────────────┘   └──────────────┘   └──────┬──────┘  │
//! │          ↑                                    │         │
//! │       cancel() ───────── stop switch ─────────┘         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Engines are discovered by capability probing: [`create_best_engine`]
//! returns `None` when no output device exists, and the chat keeps working
//! visually.

pub mod engine;
pub mod error;
pub mod playback;
pub mod synth;

pub use engine::{create_best_engine, RodioSpeech};
pub use error::{VoiceError, VoiceResult};
pub use playback::PlaybackSink;
pub use synth::{voice_for_lang, HttpTts, PlaceholderTts, TtsBackend};
