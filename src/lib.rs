//! Workspace umbrella crate for HealLink mentor matching.
//!
//! This crate re-exports the layer crates (`profile`, `matcher`, `directory`)
//! and stitches them into a single entry point, [`match_for_seeker`]:
//! validate the seeker, filter and rank the candidate pool, then attach shared
//! interests and an icebreaker to every hit.
//!
//! ```
//! use heallink::{match_with_defaults, MatchFilter, Profile, Role, Stage};
//!
//! let seeker = Profile::new("sam@example.com")
//!     .with_name("Sam")
//!     .with_age(34)
//!     .with_procedure("Liver transplant")
//!     .with_stage(Stage::PreOp)
//!     .with_language("English")
//!     .with_hospital("Mayo Clinic")
//!     .with_interests(["anime"])
//!     .with_intro("Waiting on a date.");
//! let mentor = Profile::new("alex@example.com")
//!     .with_role(Role::Mentor)
//!     .with_procedure("Liver transplant")
//!     .with_stage(Stage::PostOpEstablished)
//!     .with_interests(["anime"]);
//!
//! let hits = match_with_defaults(&seeker, &[mentor], &MatchFilter::default()).unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].rank, 1);
//! assert_eq!(hits[0].shared_interests, vec!["anime".to_string()]);
//! ```

pub mod config;

pub use config::{ConfigLoadError, HealLinkConfig};
pub use directory::{
    DirectoryConfig, DirectoryError, InMemoryDirectory, UserDirectory, load_seed, seed_from_path,
};
pub use matcher::{
    DEFAULT_LIMIT, FALLBACK_OPENER, GenderFilter, INELIGIBLE_SCORE, Icebreaker,
    IcebreakerContext, IcebreakerPolicy, MatchConfig, MatchError, MatchFilter, MatchMetrics,
    Matcher, OpenerTable, ScoreWeights, ScoredCandidate, TableIcebreaker, TemplateIcebreaker,
    apply_filters, rank_candidates, rank_scored, score, set_match_metrics, shared_interests,
    stage_compatible, suggest,
};
pub use profile::{Catalog, Gender, MIN_AGE, Profile, ProfileError, ProfileId, Role, Stage};

use serde::Serialize;
use std::error::Error;
use std::fmt;

/// Errors that can occur while matching a seeker against a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The seeker is incomplete or otherwise invalid.
    Profile(ProfileError),
    Match(MatchError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Profile(err) => write!(f, "seeker rejected: {err}"),
            PipelineError::Match(err) => write!(f, "matching failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Profile(err) => Some(err),
            PipelineError::Match(err) => Some(err),
        }
    }
}

impl From<ProfileError> for PipelineError {
    fn from(value: ProfileError) -> Self {
        PipelineError::Profile(value)
    }
}

impl From<MatchError> for PipelineError {
    fn from(value: MatchError) -> Self {
        PipelineError::Match(value)
    }
}

/// One ranked mentor with everything the client shows for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchHit {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub score: i32,
    pub mentor: Profile,
    /// Seeker interests the mentor shares, in seeker order.
    pub shared_interests: Vec<String>,
    pub icebreaker: String,
}

/// Validate `seeker`, rank `pool` through `filter`, and decorate each hit.
///
/// The seeker must be complete (see [`Profile::validate_complete`]); the pool
/// is taken as-is. `limit` defaults to the matcher's `max_results` and must be
/// positive when given. An empty result is `Ok(vec![])`.
pub fn match_for_seeker(
    seeker: &Profile,
    pool: &[Profile],
    filter: &MatchFilter,
    matcher: &Matcher,
    icebreaker: &dyn Icebreaker,
    limit: Option<usize>,
) -> Result<Vec<MatchHit>, PipelineError> {
    if let Err(err) = seeker.validate_complete() {
        tracing::warn!(seeker_id = ?seeker.id, error = %err, "match_seeker_rejected");
        return Err(err.into());
    }
    if limit == Some(0) {
        return Err(MatchError::InvalidConfig("limit must be greater than zero".into()).into());
    }

    let hits: Vec<MatchHit> = matcher
        .rank(seeker, pool, filter, limit)
        .into_iter()
        .enumerate()
        .map(|(idx, scored)| {
            let shared = shared_interests(seeker, &scored.profile);
            let context = IcebreakerContext::for_pair(seeker, &scored.profile);
            let icebreaker = icebreaker.suggest(&shared, &context);
            MatchHit {
                rank: idx + 1,
                score: scored.score,
                shared_interests: shared.into_iter().map(str::to_string).collect(),
                icebreaker,
                mentor: scored.profile,
            }
        })
        .collect();

    tracing::info!(
        seeker_id = ?seeker.id,
        pool_size = pool.len(),
        hit_count = hits.len(),
        icebreaker = icebreaker.name(),
        "match_for_seeker"
    );
    Ok(hits)
}

/// [`match_for_seeker`] with the default matcher and the opener table.
pub fn match_with_defaults(
    seeker: &Profile,
    pool: &[Profile],
    filter: &MatchFilter,
) -> Result<Vec<MatchHit>, PipelineError> {
    match_for_seeker(
        seeker,
        pool,
        filter,
        &Matcher::default(),
        &TableIcebreaker::default(),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_seeker() -> Profile {
        Profile::new("sam@example.com")
            .with_id(1)
            .with_name("Sam")
            .with_age(40)
            .with_procedure("Knee replacement")
            .with_stage(Stage::PreOp)
            .with_language("English")
            .with_hospital("Mayo Clinic")
            .with_intro("Surgery in March.")
    }

    #[test]
    fn incomplete_seeker_is_rejected() {
        let err = match_with_defaults(&Profile::new("x@y.z"), &[], &MatchFilter::default())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Profile(ProfileError::Incomplete { .. })
        ));
    }

    #[test]
    fn zero_limit_is_a_match_error() {
        let err = match_for_seeker(
            &complete_seeker(),
            &[],
            &MatchFilter::default(),
            &Matcher::default(),
            &TableIcebreaker::default(),
            Some(0),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Match(_)));
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn hits_without_shared_interests_use_procedure_template() {
        let mentor = Profile::new("m@x.org")
            .with_id(2)
            .with_role(Role::Mentor)
            .with_procedure("Knee replacement")
            .with_stage(Stage::PostOpRecent);
        let hits = match_with_defaults(&complete_seeker(), &[mentor], &MatchFilter::default())
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].shared_interests.is_empty());
        assert!(hits[0].icebreaker.starts_with("You share the Knee replacement journey"));
    }

    #[test]
    fn empty_pool_is_ok() {
        let hits = match_with_defaults(&complete_seeker(), &[], &MatchFilter::default()).unwrap();
        assert!(hits.is_empty());
    }
}
