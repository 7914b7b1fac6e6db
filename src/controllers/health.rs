use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::calendar::CalendarServiceApi;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Always ready: feeds are fetched lazily, so a cold cache is not an outage.
pub async fn health_ready(State(service): State<Arc<dyn CalendarServiceApi>>) -> impl IntoResponse {
    let cache = if service.is_warm().await { "warm" } else { "cold" };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "feeds_configured": service.feed_count(),
            "cache": cache
        })),
    )
}
