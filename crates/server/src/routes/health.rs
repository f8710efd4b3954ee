use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Liveness probe: 200 while the process is up.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "heallink-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness probe: the directory must answer.
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let profiles = state.directory.len()?;
    let mentors = state.directory.list_mentors()?.len();

    Ok(Json(json!({
        "status": "ready",
        "service": "heallink-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "directory": {
                "status": "ready",
                "profiles": profiles,
                "mentors": mentors,
            },
            "icebreaker": state.icebreaker.name(),
        }
    })))
}

/// Prometheus text exposition.
pub async fn metrics(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let body = match (&state.prometheus, state.config.metrics_enabled) {
        (Some(handle), true) => handle.render(),
        _ => format!(
            "# metrics recorder not installed\nheallink_uptime_seconds {}\n",
            uptime_seconds()
        ),
    };
    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}
