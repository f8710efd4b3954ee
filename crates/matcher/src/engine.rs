use std::time::Instant;

use profile::{Profile, Role, Stage};
use tracing::debug;

use crate::metrics::metrics_recorder;
use crate::types::{MatchConfig, MatchError, MatchFilter, ScoreWeights, ScoredCandidate};


/// Score returned for candidates that are not mentors.
pub const INELIGIBLE_SCORE: i32 = -1;

/// Default number of ranked candidates.
pub const DEFAULT_LIMIT: usize = 9;

/// Score `candidate` against `seeker` with the default weights.
///
/// Non-mentors get [`INELIGIBLE_SCORE`]. Mentors get the plain sum of the
/// weighted terms, which may be zero or negative.
pub fn score(seeker: &Profile, candidate: &Profile) -> i32 {
    score_with(&ScoreWeights::default(), seeker, candidate)
}

/// [`score`] with explicit weights.
pub fn score_with(weights: &ScoreWeights, seeker: &Profile, candidate: &Profile) -> i32 {
    if candidate.role != Role::Mentor {
        return INELIGIBLE_SCORE;
    }

    let mut total = if candidate.procedure == seeker.procedure {
        weights.procedure_match
    } else {
        weights.procedure_mismatch
    };
    if stage_compatible(seeker.stage, candidate.stage) {
        total += weights.stage_compatible;
    }
    if candidate.language == seeker.language {
        total += weights.language_match;
    }
    if seeker
        .availability
        .iter()
        .any(|slot| candidate.availability.contains(slot))
    {
        total += weights.availability_overlap;
    }
    total + weights.per_shared_interest * shared_interests(seeker, candidate).len() as i32
}

/// Whether a candidate at `candidate` stage can support a seeker.
///
/// Only the candidate side matters: any post-op candidate is compatible and a
/// candidate without a stage never is. The seeker's stage is currently ignored.
pub fn stage_compatible(_seeker: Option<Stage>, candidate: Option<Stage>) -> bool {
    candidate.is_some_and(|stage| stage.is_post_op())
}

/// Seeker interests, in seeker order, that the candidate also lists.
pub fn shared_interests<'a>(seeker: &'a Profile, candidate: &Profile) -> Vec<&'a str> {
    seeker
        .interests
        .iter()
        .filter(|tag| candidate.interests.contains(tag.as_str()))
        .map(String::as_str)
        .collect()
}

/// Keep the candidates admitted by `filter`, preserving input order.
pub fn apply_filters(candidates: &[Profile], filter: &MatchFilter, seeker: &Profile) -> Vec<Profile> {
    candidates
        .iter()
        .filter(|candidate| filter.admits(candidate, seeker))
        .cloned()
        .collect()
}

/// Positive-scoring candidates, best first, at most `limit` of them.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank_candidates(seeker: &Profile, candidates: &[Profile], limit: usize) -> Vec<Profile> {
    rank_scored(seeker, candidates, limit)
        .into_iter()
        .map(|hit| hit.profile)
        .collect()
}

/// [`rank_candidates`] with each score attached.
pub fn rank_scored(seeker: &Profile, candidates: &[Profile], limit: usize) -> Vec<ScoredCandidate> {
    rank_scored_with(&ScoreWeights::default(), seeker, candidates, limit)
}

fn rank_scored_with<'a, I>(
    weights: &ScoreWeights,
    seeker: &Profile,
    candidates: I,
    limit: usize,
) -> Vec<ScoredCandidate>
where
    I: IntoIterator<Item = &'a Profile>,
{
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = score_with(weights, seeker, candidate);
            (score > 0).then(|| ScoredCandidate {
                profile: candidate.clone(),
                score,
            })
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Configured matcher: filter, score and rank in one call.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn score(&self, seeker: &Profile, candidate: &Profile) -> i32 {
        score_with(&self.config.weights, seeker, candidate)
    }

    /// Filter `pool`, score what is left and return the best hits.
    ///
    /// The seeker's own record (same id) is skipped. `limit` falls back to
    /// `max_results` and is capped by it.
    pub fn rank(
        &self,
        seeker: &Profile,
        pool: &[Profile],
        filter: &MatchFilter,
        limit: Option<usize>,
    ) -> Vec<ScoredCandidate> {
        let start = Instant::now();
        let limit = limit
            .unwrap_or(self.config.max_results)
            .min(self.config.max_results);

        let admitted: Vec<&Profile> = pool
            .iter()
            .filter(|candidate| !is_same_record(seeker, candidate))
            .filter(|candidate| filter.admits(candidate, seeker))
            .collect();
        let pool_size = admitted.len();
        let hits = rank_scored_with(&self.config.weights, seeker, admitted, limit);
        let latency = start.elapsed();

        debug!(
            seeker_id = ?seeker.id,
            pool_size,
            hit_count = hits.len(),
            top_score = hits.first().map(|h| h.score),
            elapsed_micros = latency.as_micros(),
            "match_ranked"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_match(pool_size, hits.len(), latency);
        }

        hits
    }
}

fn is_same_record(seeker: &Profile, candidate: &Profile) -> bool {
    matches!((seeker.id, candidate.id), (Some(a), Some(b)) if a == b)
}
