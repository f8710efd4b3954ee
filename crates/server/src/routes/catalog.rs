use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

/// Option lists for the profile form (GET /api/v1/catalog).
pub async fn get_catalog(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(state.catalog.as_ref().clone())
}
