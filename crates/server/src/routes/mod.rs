//! API route handlers
//!
//! - `health`: liveness, readiness and Prometheus metrics
//! - `users`: directory CRUD and lookup by email
//! - `matching`: ranked mentor matches and icebreakers
//! - `catalog`: the profile form option lists

pub mod catalog;
pub mod health;
pub mod matching;
pub mod users;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info (GET /).
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "HealLink Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/users",
            "/api/v1/users/{id}",
            "/api/v1/users/by-email/{email}",
            "/api/v1/match",
            "/api/v1/icebreaker",
            "/api/v1/catalog",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound("no such route".to_string())
}
