//! Client configuration loaded from the environment.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | MITRA_GATEWAY_URL | http://127.0.0.1:8000 | Base URL of the gateway serving /ask-ai and the panel endpoints. |
//! | MITRA_REQUEST_TIMEOUT_SECS | 60 | Transport-level timeout on outbound requests. |
//! | MITRA_SPEECH_LANG | (unset) | BCP-47 tag for spoken replies; unset falls back to hi-IN. |

use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8000";

/// Configuration for a chat client (console or embedding application).
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub gateway_url: String,
    pub request_timeout: Duration,
    pub speech_lang: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            request_timeout: Duration::from_secs(60),
            speech_lang: None,
        }
    }
}

impl ChatConfig {
    /// Load from environment. Unset or invalid values fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            gateway_url: env_opt_string("MITRA_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            request_timeout: Duration::from_secs(env_u64("MITRA_REQUEST_TIMEOUT_SECS", 60)),
            speech_lang: env_opt_string("MITRA_SPEECH_LANG"),
        }
    }
}

pub(crate) fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(crate) fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(v) => v.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ChatConfig::default();
        assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(config.speech_lang.is_none());
    }
}
