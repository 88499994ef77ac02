//! # Mitra Core - Krishi Mitra chat session core
//!
//! The conversational heart of the Krishi Mitra farmer assistant: a chat
//! session controller that collects a question, forwards it to the remote
//! assistant, renders the reply into a conversation log, and speaks it aloud
//! through a speech coordinator with mute and language selection.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Chat Session Controller                    │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────────┐  │
//! │  │ Conversation │  │    Markup    │  │      Speech       │  │
//! │  │     Log      │  │   Renderer   │  │    Coordinator    │  │
//! │  └──────┬───────┘  └──────────────┘  └─────────┬─────────┘  │
//! │         ↓                                       ↓            │
//! │  ┌──────────────┐                     ┌───────────────────┐ │
//! │  │ ChatSurface  │                     │   SpeechSynth     │ │
//! │  │ (capability) │                     │   (capability)    │ │
//! │  └──────────────┘                     └───────────────────┘ │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             ↓
//!                    POST /ask-ai (QaBackend)
//! ```
//!
//! Display, speech and the network each sit behind a capability trait so the
//! controller runs identically against a terminal, a GUI, or in-memory fakes.

pub mod client;
pub mod config;
pub mod error;
pub mod markup;
pub mod panels;
pub mod session;
pub mod speech;
pub mod transcript;

pub use client::{AskOutcome, AskReply, AskRequest, HttpQaClient, QaBackend};
pub use config::ChatConfig;
pub use error::{MitraError, MitraResult};
pub use markup::{escape_text, render_inline, strip_for_speech};
pub use panels::{
    fill_market_prices, fill_weather, market_lines, weather_line, MarketPrice, PanelTarget,
    WeatherSnapshot, PANEL_FAILURE_MESSAGE,
};
pub use session::{
    ChatPhase, ChatSession, AI_FAILURE_MESSAGE, CONNECTIVITY_FAILURE_MESSAGE,
};
pub use speech::{NullSpeech, SpeechCoordinator, SpeechSynth, Utterance, DEFAULT_LANG};
pub use transcript::{ChatSurface, ConversationLog, EntryHandle, Message, RenderState, Sender};
