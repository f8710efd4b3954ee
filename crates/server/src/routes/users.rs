use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use profile::{Profile, ProfileId};
use serde::Serialize;
use std::sync::Arc;

/// Directory listing
#[derive(Debug, Serialize)]
pub struct UserList {
    pub total: usize,
    pub users: Vec<Profile>,
}

fn check_catalog(state: &ServerState, profile: &Profile) -> ServerResult<()> {
    if state.config.strict_catalog {
        profile.validate_against(&state.catalog)?;
    }
    Ok(())
}

/// Create a profile (POST /api/v1/users). A bare `{ "email": ... }` is a
/// valid signup.
pub async fn create_user(
    State(state): State<Arc<ServerState>>,
    Json(profile): Json<Profile>,
) -> ServerResult<impl IntoResponse> {
    check_catalog(&state, &profile)?;
    let created = state.directory.create(profile)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List every profile (GET /api/v1/users).
pub async fn list_users(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let users = state.directory.list_all()?;
    Ok(Json(UserList {
        total: users.len(),
        users,
    }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<ProfileId>,
) -> ServerResult<impl IntoResponse> {
    state
        .directory
        .get(id)?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("user {id}")))
}

/// GET /api/v1/users/by-email/{email}
pub async fn get_user_by_email(
    State(state): State<Arc<ServerState>>,
    Path(email): Path<String>,
) -> ServerResult<impl IntoResponse> {
    state
        .directory
        .find_by_email(&email)?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("user with email {email}")))
}

/// Replace a profile (PUT /api/v1/users/{id}). The id in the path wins.
pub async fn update_user(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<ProfileId>,
    Json(profile): Json<Profile>,
) -> ServerResult<impl IntoResponse> {
    check_catalog(&state, &profile)?;
    let updated = state.directory.update(id, profile)?;
    Ok(Json(updated))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<ProfileId>,
) -> ServerResult<StatusCode> {
    if state.directory.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::NotFound(format!("user {id}")))
    }
}
