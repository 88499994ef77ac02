//! Weather and market-price panels.
//!
//! A separate page concern from the chat core: each panel does a one-shot GET
//! against a read-only endpoint and fills a fixed display region through the
//! [`PanelTarget`] capability. Any failure (non-2xx or transport) renders a
//! fixed localized error string in place of data. No retries, no state.

use crate::error::MitraResult;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Shown in a panel when its data could not be fetched.
pub const PANEL_FAILURE_MESSAGE: &str = "क्षमा करें, डेटा लोड नहीं हो सका।";

/// `GET /api/weather` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
}

/// One row of `GET /api/market_prices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub crop: String,
    pub price: String,
}

/// A fixed display region a panel renders into.
pub trait PanelTarget: Send + Sync {
    fn show(&self, text: &str);
}

pub fn weather_line(snapshot: &WeatherSnapshot) -> String {
    format!(
        "{}, {}, आर्द्रता {}",
        snapshot.temperature, snapshot.condition, snapshot.humidity
    )
}

pub fn market_lines(prices: &[MarketPrice]) -> String {
    prices
        .iter()
        .map(|p| format!("{}: {}", p.crop, p.price))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn fetch_weather(client: &reqwest::Client, base_url: &str) -> MitraResult<WeatherSnapshot> {
    let url = format!("{}/api/weather", base_url.trim_end_matches('/'));
    let snapshot = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json::<WeatherSnapshot>()
        .await?;
    Ok(snapshot)
}

async fn fetch_market_prices(
    client: &reqwest::Client,
    base_url: &str,
) -> MitraResult<Vec<MarketPrice>> {
    let url = format!("{}/api/market_prices", base_url.trim_end_matches('/'));
    let prices = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<MarketPrice>>()
        .await?;
    Ok(prices)
}

/// Fill the weather panel once; errors render the fixed failure string.
pub async fn fill_weather(client: &reqwest::Client, base_url: &str, target: &dyn PanelTarget) {
    match fetch_weather(client, base_url).await {
        Ok(snapshot) => target.show(&weather_line(&snapshot)),
        Err(e) => {
            warn!("weather fetch failed: {e}");
            target.show(PANEL_FAILURE_MESSAGE);
        }
    }
}

/// Fill the market-price panel once; errors render the fixed failure string.
pub async fn fill_market_prices(
    client: &reqwest::Client,
    base_url: &str,
    target: &dyn PanelTarget,
) {
    match fetch_market_prices(client, base_url).await {
        Ok(prices) => target.show(&market_lines(&prices)),
        Err(e) => {
            warn!("market price fetch failed: {e}");
            target.show(PANEL_FAILURE_MESSAGE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_deserializes_from_wire_shape() {
        let snapshot: WeatherSnapshot = serde_json::from_value(serde_json::json!({
            "temperature": "24.5°C",
            "condition": "Scattered clouds",
            "humidity": "62%",
        }))
        .unwrap();
        assert_eq!(
            weather_line(&snapshot),
            "24.5°C, Scattered clouds, आर्द्रता 62%"
        );
    }

    #[test]
    fn market_rows_render_one_per_line() {
        let prices = vec![
            MarketPrice {
                crop: "Wheat".to_string(),
                price: "₹2250 / Quintal".to_string(),
            },
            MarketPrice {
                crop: "Tomato".to_string(),
                price: "₹1800 / Quintal".to_string(),
            },
        ];
        assert_eq!(
            market_lines(&prices),
            "Wheat: ₹2250 / Quintal\nTomato: ₹1800 / Quintal"
        );
    }
}
