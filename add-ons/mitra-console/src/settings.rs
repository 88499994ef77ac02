//! User-specific settings stored locally in `user_config.toml`.
//!
//! Lets a user pin their gateway URL, preferred speech language and a
//! start-muted flag without touching environment variables. Environment
//! config still applies where a field is unset.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserSettings {
    /// Gateway base URL; unset falls back to MITRA_GATEWAY_URL / the default.
    #[serde(default)]
    pub gateway_url: Option<String>,

    /// BCP-47 tag for spoken replies (e.g. "hi-IN", "en-IN").
    #[serde(default)]
    pub speech_lang: Option<String>,

    /// Start the session muted.
    #[serde(default)]
    pub start_muted: bool,
}

impl UserSettings {
    pub fn default_path() -> PathBuf {
        PathBuf::from("user_config.toml")
    }

    /// Load from the default path, creating a default file on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let settings: UserSettings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            let settings = UserSettings::default();
            settings.save_to_path(path)?;
            Ok(settings)
        }
    }

    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_parses_to_defaults() {
        let settings: UserSettings = toml::from_str("").unwrap();
        assert!(settings.gateway_url.is_none());
        assert!(settings.speech_lang.is_none());
        assert!(!settings.start_muted);
    }

    #[test]
    fn round_trips_through_toml() {
        let settings = UserSettings {
            gateway_url: Some("http://127.0.0.1:9000".to_string()),
            speech_lang: Some("en-IN".to_string()),
            start_muted: true,
        };
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: UserSettings = toml::from_str(&text).unwrap();
        assert_eq!(parsed.gateway_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(parsed.speech_lang.as_deref(), Some("en-IN"));
        assert!(parsed.start_muted);
    }
}
