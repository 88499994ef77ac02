//! `/api/weather`: one-shot OpenWeatherMap snapshot for the configured city.
//!
//! A failing city falls back to the default city once; if that also fails the
//! handler returns non-2xx and the page renders its fixed error string.

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mitra_core::WeatherSnapshot;
use serde::Deserialize;
use tracing::warn;

const FALLBACK_CITY: &str = "Jabalpur";

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn to_snapshot(owm: OwmResponse) -> anyhow::Result<WeatherSnapshot> {
    let condition = owm
        .weather
        .first()
        .ok_or_else(|| anyhow::anyhow!("weather response has no condition"))?;
    Ok(WeatherSnapshot {
        temperature: format!("{}°C", owm.main.temp),
        condition: capitalize(&condition.description),
        humidity: format!("{}%", owm.main.humidity),
    })
}

async fn fetch_city(state: &AppState, city: &str) -> anyhow::Result<WeatherSnapshot> {
    let key = state
        .config
        .weather_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("WEATHER_API_KEY is not configured"))?;
    let url = format!(
        "{}?q={}&appid={}&units=metric&lang=en",
        state.config.weather_api_base, city, key
    );
    let owm: OwmResponse = state
        .client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    to_snapshot(owm)
}

pub async fn weather(State(state): State<AppState>) -> Response {
    let city = state.config.default_city.clone();
    match fetch_city(&state, &city).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            warn!("weather fetch for {city:?} failed: {e}");
            if city != FALLBACK_CITY {
                if let Ok(snapshot) = fetch_city(&state, FALLBACK_CITY).await {
                    return (StatusCode::OK, Json(snapshot)).into_response();
                }
            }
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "weather data unavailable" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_openweathermap_shape_to_snapshot() {
        let owm: OwmResponse = serde_json::from_value(serde_json::json!({
            "main": { "temp": 24.5, "humidity": 62 },
            "weather": [ { "description": "scattered clouds" } ],
        }))
        .unwrap();
        let snapshot = to_snapshot(owm).unwrap();
        assert_eq!(snapshot.temperature, "24.5°C");
        assert_eq!(snapshot.condition, "Scattered clouds");
        assert_eq!(snapshot.humidity, "62%");
    }

    #[test]
    fn empty_condition_list_is_an_error() {
        let owm: OwmResponse = serde_json::from_value(serde_json::json!({
            "main": { "temp": 30.0, "humidity": 40 },
            "weather": [],
        }))
        .unwrap();
        assert!(to_snapshot(owm).is_err());
    }
}
