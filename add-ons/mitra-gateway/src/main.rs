//! Axum-based gateway for the Krishi Mitra page: `/ask-ai` plus the read-only
//! weather and market-price endpoints, with static files served at the root.

mod config;
mod handlers;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use config::GatewayConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub client: reqwest::Client,
}

fn build_app(state: AppState) -> Router {
    let public_dir = state.config.public_dir.clone();

    // Page and API are same-origin in production; permissive CORS keeps local
    // UI development against a separately served page working.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/ask-ai", post(handlers::ask::ask_ai))
        .route("/api/weather", get(handlers::weather::weather))
        .route("/api/market_prices", get(handlers::market::market_prices))
        .with_state(state)
        .layer(cors);

    if public_dir.exists() {
        app = app.fallback_service(ServeDir::new(public_dir));
    }
    app
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Arc::new(GatewayConfig::from_env()?);
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let addr = config.bind_addr;
    let app = build_app(AppState { config, client });

    info!("mitra gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mitra_core::MarketPrice;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            config: Arc::new(GatewayConfig::default()),
            client: reqwest::Client::new(),
        }
    }

    #[tokio::test]
    async fn market_prices_returns_the_fixed_list() {
        let app = build_app(test_state());
        let req = Request::builder()
            .method("GET")
            .uri("/api/market_prices")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let prices: Vec<MarketPrice> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(prices.len(), 3);
        assert_eq!(prices[0].crop, "Wheat");
    }

    #[tokio::test]
    async fn ask_ai_without_a_key_still_carries_a_fallback_answer() {
        let app = build_app(test_state());
        let req = Request::builder()
            .method("POST")
            .uri("/ask-ai")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"message":"गेहूं कब बोएं?"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["answer"], handlers::ask::UPSTREAM_FALLBACK);
    }

    #[tokio::test]
    async fn weather_without_a_key_reports_unavailable() {
        let app = build_app(test_state());
        let req = Request::builder()
            .method("GET")
            .uri("/api/weather")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }
}
