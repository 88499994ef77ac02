//! Text-to-audio backends.
//!
//! A [`TtsBackend`] turns an utterance into audio bytes (WAV/MP3). The
//! production backend is an OpenAI-compatible `/audio/speech` API; the
//! placeholder returns empty audio so the pipeline stays exercisable without
//! a key.

use crate::error::{VoiceError, VoiceResult};
use mitra_core::Utterance;

/// Backend that turns an utterance into audio bytes. Return an empty vec to
/// skip playback.
pub trait TtsBackend: Send + Sync {
    fn synthesize(&self, utterance: &Utterance) -> VoiceResult<Vec<u8>>;
}

/// Placeholder TTS: returns empty audio so nothing plays. Keeps the playback
/// pipeline testable without an API key.
#[derive(Debug, Default)]
pub struct PlaceholderTts;

impl TtsBackend for PlaceholderTts {
    fn synthesize(&self, _utterance: &Utterance) -> VoiceResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// Map the utterance language to an API voice. Indic locales get the warmer
/// voices; anything unrecognized falls back to the neutral default.
pub fn voice_for_lang(lang: &str) -> &'static str {
    let primary = lang.split('-').next().unwrap_or("");
    if primary.eq_ignore_ascii_case("hi") {
        "shimmer"
    } else if primary.eq_ignore_ascii_case("mr") || primary.eq_ignore_ascii_case("bn") {
        "nova"
    } else {
        "alloy"
    }
}

/// Production TTS backend: OpenAI-compatible API (OpenAI, OpenRouter, etc.).
/// Uses `TTS_API_URL` (e.g. https://api.openai.com/v1) and `TTS_API_KEY`.
#[derive(Debug, Clone)]
pub struct HttpTts {
    /// Base URL without trailing slash (e.g. https://api.openai.com/v1).
    pub base_url: String,
    /// Bearer API key.
    pub api_key: String,
    /// TTS model: tts-1 (fast) or tts-1-hd (higher quality).
    pub model: String,
    /// Override voice (alloy, echo, nova, shimmer, etc.). If None, derived
    /// from the utterance language.
    pub voice_override: Option<String>,
    /// HTTP client (blocking) for sync synthesize().
    client: reqwest::blocking::Client,
}

impl HttpTts {
    /// Build from environment: TTS_API_URL, TTS_API_KEY, TTS_MODEL, TTS_VOICE.
    pub fn from_env() -> VoiceResult<Self> {
        let base_url = std::env::var("TTS_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = std::env::var("TTS_API_KEY")
            .map_err(|_| VoiceError::Config("TTS requires TTS_API_KEY".to_string()))?;
        let model = std::env::var("TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string());
        let voice_override = std::env::var("TTS_VOICE").ok().filter(|v| !v.trim().is_empty());
        let mut tts = Self::new(base_url, api_key, model)?;
        tts.voice_override = voice_override;
        Ok(tts)
    }

    /// Create with explicit config (e.g. for tests or non-env wiring).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> VoiceResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| VoiceError::Tts(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            voice_override: None,
            client,
        })
    }

    /// Set a fixed voice (e.g. "nova") instead of deriving from the language.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice_override = Some(voice.into());
        self
    }

    fn voice_id(&self, lang: &str) -> String {
        if let Some(ref v) = self.voice_override {
            return v.clone();
        }
        voice_for_lang(lang).to_string()
    }
}

impl TtsBackend for HttpTts {
    fn synthesize(&self, utterance: &Utterance) -> VoiceResult<Vec<u8>> {
        let text = utterance.text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/audio/speech", self.base_url.trim_end_matches('/'));
        let voice = self.voice_id(&utterance.lang);
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
            "voice": voice,
            "speed": utterance.rate,
        });
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| VoiceError::Tts(e.to_string()))?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(VoiceError::Tts(format!("TTS API error {}: {}", status, body)));
        }
        let bytes = res.bytes().map_err(|e| VoiceError::Tts(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_tts_returns_empty() {
        let tts = PlaceholderTts;
        let utterance = Utterance::new("नमस्ते", None);
        let out = tts.synthesize(&utterance).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn voice_follows_language() {
        assert_eq!(voice_for_lang("hi-IN"), "shimmer");
        assert_eq!(voice_for_lang("mr-IN"), "nova");
        assert_eq!(voice_for_lang("en-IN"), "alloy");
        assert_eq!(voice_for_lang(""), "alloy");
    }

    #[test]
    fn voice_override_wins() {
        let tts = HttpTts::new("https://api.openai.com/v1", "k", "tts-1")
            .unwrap()
            .with_voice("echo");
        assert_eq!(tts.voice_id("hi-IN"), "echo");
    }
}
