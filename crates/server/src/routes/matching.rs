use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use heallink::{match_for_seeker, MatchHit};
use matcher::{shared_interests, IcebreakerContext, IcebreakerPolicy, MatchFilter};
use profile::{Profile, ProfileId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shown with an empty hit list.
const BROADEN_FILTERS_HINT: &str =
    "No mentors match your filters. Try switching gender to Any, unchecking My hospital only, or picking different hospitals.";

/// Match request
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub seeker_id: ProfileId,

    /// Pre-scoring facets; omitted means no constraint.
    #[serde(default)]
    pub filters: MatchFilter,

    /// Maximum hits; capped by the server's `default_match_limit`.
    #[serde(default)]
    pub limit: Option<usize>,

    /// Icebreaker strategy for this request.
    #[serde(default)]
    pub policy: Option<IcebreakerPolicy>,
}

/// Match response
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub seeker_id: ProfileId,
    pub total_matches: usize,
    pub matches: Vec<MatchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IcebreakerRequest {
    pub seeker_id: ProfileId,
    pub candidate_id: ProfileId,
    #[serde(default)]
    pub policy: Option<IcebreakerPolicy>,
}

#[derive(Debug, Serialize)]
pub struct IcebreakerResponse {
    pub policy: &'static str,
    pub shared_interests: Vec<String>,
    pub icebreaker: String,
}

fn load_profile(state: &ServerState, id: ProfileId, role: &str) -> ServerResult<Profile> {
    state
        .directory
        .get(id)?
        .ok_or_else(|| ServerError::NotFound(format!("{role} {id}")))
}

/// Rank mentors for a seeker (POST /api/v1/match).
///
/// The candidate pool is every mentor in the directory minus the seeker. An
/// empty result is a 200 with a hint to broaden the filters.
pub async fn match_mentors(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<MatchRequest>,
) -> ServerResult<impl IntoResponse> {
    let seeker = load_profile(&state, request.seeker_id, "seeker")?;
    let pool = state.directory.list_mentors()?;
    let icebreaker = state.icebreaker_for(request.policy);

    let matches = match_for_seeker(
        &seeker,
        &pool,
        &request.filters,
        &state.matcher,
        icebreaker.as_ref(),
        request.limit,
    )?;

    tracing::info!(
        seeker_id = request.seeker_id,
        pool_size = pool.len(),
        hit_count = matches.len(),
        filtered = !request.filters.is_unconstrained(),
        "match_request"
    );

    let hint = matches
        .is_empty()
        .then(|| BROADEN_FILTERS_HINT.to_string());
    Ok(Json(MatchResponse {
        seeker_id: request.seeker_id,
        total_matches: matches.len(),
        matches,
        hint,
    }))
}

/// Suggest an opener for a specific pair (POST /api/v1/icebreaker).
pub async fn suggest_icebreaker(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<IcebreakerRequest>,
) -> ServerResult<impl IntoResponse> {
    let seeker = load_profile(&state, request.seeker_id, "seeker")?;
    let candidate = load_profile(&state, request.candidate_id, "candidate")?;
    let icebreaker = state.icebreaker_for(request.policy);

    let shared = shared_interests(&seeker, &candidate);
    let text = icebreaker.suggest(&shared, &IcebreakerContext::for_pair(&seeker, &candidate));

    Ok(Json(IcebreakerResponse {
        policy: icebreaker.name(),
        shared_interests: shared.into_iter().map(str::to_string).collect(),
        icebreaker: text,
    }))
}
