use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    infrastructure::config::{Config, Environment},
};

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub base_path: String,
    pub ics_urls: Vec<String>,
    pub environment: Environment,
}

/// GET /debug - Effective configuration, development only
pub async fn debug_config(State(config): State<Arc<Config>>) -> AppResult<Json<DebugResponse>> {
    if !config.is_development() {
        return Err(AppError::NotFound("/debug".to_string()));
    }

    Ok(Json(DebugResponse {
        base_path: config.base_path.clone(),
        ics_urls: config.ics_urls.clone(),
        environment: config.environment.clone(),
    }))
}
