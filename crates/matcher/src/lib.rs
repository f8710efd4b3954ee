//! # HealLink Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` decides which mentors to show a seeker and in what order, and
//! proposes a first message for each pair. Everything here is a pure function
//! over in-memory [`profile::Profile`] values: no I/O, no clocks (apart from
//! latency metrics), no shared mutable state.
//!
//! The pipeline is:
//! 1. [`apply_filters`]: drop candidates failing any [`MatchFilter`] facet.
//! 2. [`score`]: an integer weighted sum per candidate (non-mentors get
//!    [`INELIGIBLE_SCORE`]).
//! 3. [`rank_candidates`]: keep positive scores, stable-sort descending,
//!    truncate to the limit (default 9).
//! 4. [`Icebreaker::suggest`]: a conversation starter from shared interests.
//!
//! ## Core Types
//!
//! - [`ScoreWeights`]: the terms of the scoring sum.
//! - [`MatchConfig`]: result limit and weights for a [`Matcher`].
//! - [`MatchFilter`] / [`GenderFilter`]: optional pre-scoring facets.
//! - [`ScoredCandidate`]: a ranked candidate with its score.
//! - [`Matcher`]: filter, score and rank with configured weights.
//! - [`Icebreaker`], [`TableIcebreaker`], [`TemplateIcebreaker`],
//!   [`IcebreakerPolicy`]: conversation starters.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{rank_scored, score, suggest, shared_interests, IcebreakerContext};
//! use profile::{Profile, Role, Stage};
//!
//! let seeker = Profile::new("sam@example.com")
//!     .with_procedure("Liver transplant")
//!     .with_stage(Stage::PreOp)
//!     .with_language("English")
//!     .with_availability(["Evenings"])
//!     .with_interests(["anime", "music"]);
//!
//! let mentor = Profile::new("alex@example.com")
//!     .with_name("Alex R.")
//!     .with_role(Role::Mentor)
//!     .with_procedure("Liver transplant")
//!     .with_stage(Stage::PostOpEstablished)
//!     .with_language("English")
//!     .with_availability(["Evenings", "Weekends"])
//!     .with_interests(["anime", "cooking"]);
//!
//! assert_eq!(score(&seeker, &mentor), 187);
//!
//! let ranked = rank_scored(&seeker, &[mentor.clone()], 9);
//! assert_eq!(ranked[0].score, 187);
//!
//! let shared = shared_interests(&seeker, &mentor);
//! let opener = suggest(&shared, &IcebreakerContext::for_pair(&seeker, &mentor));
//! assert!(opener.contains("anime"));
//! ```
//!
//! ## Observability
//!
//! Install a [`MatchMetrics`] implementation via [`set_match_metrics`] to record
//! pool size, hit count and latency for every [`Matcher::rank`] call.

pub mod engine;
pub mod icebreaker;
pub mod metrics;
pub mod types;

pub use crate::engine::{
    apply_filters, rank_candidates, rank_scored, score, score_with, shared_interests,
    stage_compatible, Matcher, DEFAULT_LIMIT, INELIGIBLE_SCORE,
};
pub use crate::icebreaker::{
    suggest, Icebreaker, IcebreakerContext, IcebreakerPolicy, OpenerTable, TableIcebreaker,
    TemplateIcebreaker, FALLBACK_OPENER,
};
pub use crate::metrics::{set_match_metrics, MatchMetrics};
pub use crate::types::{
    GenderFilter, MatchConfig, MatchError, MatchFilter, ScoreWeights, ScoredCandidate,
};
