//! REST handlers for the read-only catalog

use super::models::PlantSize;
use crate::cart::state::SharedState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

/// Creates routes for catalog browsing
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/plants", get(list_plants))
        .route("/coupons", get(list_coupons))
}

/// Filters for the plant list, comma-separated:
/// `/plants?size=big,small&color=red`. Unrecognized size tokens are
/// ignored.
#[derive(Debug, Default, Deserialize)]
struct PlantFilter {
    size: Option<String>,
    color: Option<String>,
}

/// Endpoint: GET /plants
/// Lists the catalog, optionally narrowed by size and color.
async fn list_plants(
    State(state): State<SharedState>,
    Query(filter): Query<PlantFilter>,
) -> impl IntoResponse {
    let sizes: Vec<PlantSize> = filter
        .size
        .as_deref()
        .unwrap_or("")
        .split(',')
        .filter_map(|s| PlantSize::parse(s.trim()))
        .collect();

    let colors: Vec<String> = filter
        .color
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    Json(json!({ "plants": state.catalog.filter(&sizes, &colors) }))
}

/// Endpoint: GET /coupons
/// Lists the coupon table, sorted by code.
async fn list_coupons(State(state): State<SharedState>) -> impl IntoResponse {
    let mut coupons: Vec<_> = state
        .catalog
        .coupons()
        .iter()
        .map(|(code, coupon)| {
            json!({
                "code": code,
                "discountPercent": coupon.discount_percent,
                "description": coupon.description,
            })
        })
        .collect();
    coupons.sort_by(|a, b| a["code"].as_str().cmp(&b["code"].as_str()));

    Json(json!({ "coupons": coupons }))
}
