//! Gateway configuration loaded from `.env`.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | MITRA_BIND_ADDR | 127.0.0.1:8000 | Listen address. |
//! | GEMINI_API_KEY | (unset) | Key for the generative-language API; without it /ask-ai always answers with the fallback. |
//! | GEMINI_API_BASE | googleapis v1beta | Override for tests or proxies. |
//! | GEMINI_MODEL | gemini-2.5-flash | Model used for answers. |
//! | WEATHER_API_KEY | (unset) | OpenWeatherMap key; without it /api/weather fails over to the error response. |
//! | WEATHER_API_BASE | openweathermap 2.5 | Override for tests or proxies. |
//! | MITRA_DEFAULT_CITY | Jabalpur | City queried for weather. |
//! | MITRA_PUBLIC_DIR | public | Static files served at the root. |

use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_WEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub gemini_api_base: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub weather_api_base: String,
    pub weather_api_key: Option<String>,
    pub default_city: String,
    pub public_dir: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            weather_api_base: DEFAULT_WEATHER_API_BASE.to_string(),
            weather_api_key: None,
            default_city: "Jabalpur".to_string(),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl GatewayConfig {
    /// Load from environment. Unset values fall back to defaults; a bad bind
    /// address is a startup error rather than a silent fallback.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let bind_addr = match env_opt("MITRA_BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid MITRA_BIND_ADDR {raw:?}: {e}"))?,
            None => defaults.bind_addr,
        };
        Ok(Self {
            bind_addr,
            gemini_api_base: env_opt("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            gemini_model: env_opt("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            weather_api_base: env_opt("WEATHER_API_BASE").unwrap_or(defaults.weather_api_base),
            weather_api_key: env_opt("WEATHER_API_KEY"),
            default_city: env_opt("MITRA_DEFAULT_CITY").unwrap_or(defaults.default_city),
            public_dir: env_opt("MITRA_PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
        })
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
