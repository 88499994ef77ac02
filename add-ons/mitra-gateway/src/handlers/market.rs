//! `/api/market_prices`: fixed crop price list.
//!
//! Placeholder data until a mandi price feed is wired in; the shape matches
//! what the page's market panel consumes.

use axum::Json;
use mitra_core::MarketPrice;

pub async fn market_prices() -> Json<Vec<MarketPrice>> {
    Json(vec![
        MarketPrice {
            crop: "Wheat".to_string(),
            price: "₹2250 / Quintal".to_string(),
        },
        MarketPrice {
            crop: "Tomato".to_string(),
            price: "₹1800 / Quintal".to_string(),
        },
        MarketPrice {
            crop: "Potato".to_string(),
            price: "₹2100 / Quintal".to_string(),
        },
    ])
}
