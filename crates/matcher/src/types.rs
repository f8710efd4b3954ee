use std::fmt;
use std::str::FromStr;

use profile::{Gender, Profile, ProfileError, Stage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer weights of the scoring sum.
///
/// The defaults reproduce the fixed reference weights; the free functions in
/// [`crate::engine`] always use them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoreWeights {
    /// Added when seeker and candidate share a procedure.
    pub procedure_match: i32,
    /// Added (normally negative) when procedures differ.
    pub procedure_mismatch: i32,
    /// Added when the candidate's stage is compatible.
    pub stage_compatible: i32,
    pub language_match: i32,
    /// Added once when availability slots intersect at all.
    pub availability_overlap: i32,
    /// Added for every interest both sides list.
    pub per_shared_interest: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            procedure_match: 100,
            procedure_mismatch: -5,
            stage_compatible: 50,
            language_match: 15,
            availability_overlap: 10,
            per_shared_interest: 12,
        }
    }
}

/// Configuration for a [`crate::Matcher`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Maximum number of ranked candidates returned.
    #[serde(default = "MatchConfig::default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub weights: ScoreWeights,
}

impl MatchConfig {
    pub(crate) fn default_max_results() -> usize {
        9
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.max_results == 0 {
            return Err(MatchError::InvalidConfig(
                "max_results must be greater than zero".into(),
            ));
        }
        if self.weights.procedure_match <= 0 {
            return Err(MatchError::InvalidConfig(
                "weights.procedure_match must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_results: Self::default_max_results(),
            weights: ScoreWeights::default(),
        }
    }
}

/// Gender facet of a [`MatchFilter`].
///
/// Accepts `"any"` (any case) or any gender label on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GenderFilter {
    #[default]
    Any,
    Only(Gender),
}

impl GenderFilter {
    pub fn admits(&self, gender: Option<Gender>) -> bool {
        match self {
            GenderFilter::Any => true,
            GenderFilter::Only(wanted) => gender == Some(*wanted),
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderFilter::Any => f.write_str("any"),
            GenderFilter::Only(g) => write!(f, "{g}"),
        }
    }
}

impl FromStr for GenderFilter {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            return Ok(GenderFilter::Any);
        }
        trimmed.parse().map(GenderFilter::Only)
    }
}

impl TryFrom<String> for GenderFilter {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GenderFilter> for String {
    fn from(value: GenderFilter) -> Self {
        value.to_string()
    }
}

impl From<Gender> for GenderFilter {
    fn from(value: Gender) -> Self {
        GenderFilter::Only(value)
    }
}

/// Optional facets applied to the candidate pool before scoring.
///
/// Every field defaults to "no constraint", so `{}` deserializes to a filter
/// that admits everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchFilter {
    pub gender: GenderFilter,
    /// Allowed hospitals. Empty admits any hospital.
    #[serde(alias = "hospital_set")]
    pub hospitals: Vec<String>,
    /// Restrict to the seeker's own hospital when the seeker has one.
    pub my_hospital_only: bool,
    /// Inclusive lower age bound.
    pub age_min: Option<u32>,
    /// Inclusive upper age bound.
    pub age_max: Option<u32>,
    pub language: Option<String>,
    pub procedure: Option<String>,
    pub stage: Option<Stage>,
}

impl MatchFilter {
    pub fn with_gender(mut self, gender: impl Into<GenderFilter>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_hospitals<I, S>(mut self, hospitals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hospitals = hospitals.into_iter().map(Into::into).collect();
        self
    }

    pub fn my_hospital_only(mut self) -> Self {
        self.my_hospital_only = true;
        self
    }

    pub fn with_age_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.age_min = min;
        self.age_max = max;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = Some(procedure.into());
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// `true` when no facet is set.
    pub fn is_unconstrained(&self) -> bool {
        *self == MatchFilter::default()
    }

    /// Whether `candidate` passes every facet, evaluated relative to `seeker`.
    pub fn admits(&self, candidate: &Profile, seeker: &Profile) -> bool {
        if !self.gender.admits(candidate.gender) {
            return false;
        }
        if !self.hospitals.is_empty() && !self.hospitals.contains(&candidate.hospital) {
            return false;
        }
        if self.my_hospital_only
            && !seeker.hospital.is_empty()
            && candidate.hospital != seeker.hospital
        {
            return false;
        }
        if let Some(min) = self.age_min {
            if !candidate.age.is_some_and(|age| age >= min) {
                return false;
            }
        }
        if let Some(max) = self.age_max {
            if !candidate.age.is_some_and(|age| age <= max) {
                return false;
            }
        }
        if !exact(self.language.as_deref(), &candidate.language) {
            return false;
        }
        if !exact(self.procedure.as_deref(), &candidate.procedure) {
            return false;
        }
        match self.stage {
            Some(stage) => candidate.stage == Some(stage),
            None => true,
        }
    }
}

// Blank strings count as unset.
fn exact(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim) {
        None | Some("") => true,
        Some(w) => w == actual,
    }
}

/// A candidate paired with the score it earned against one seeker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate {
    pub profile: Profile,
    pub score: i32,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile::Role;
    use serde_json::json;

    fn mentor(hospital: &str, age: Option<u32>) -> Profile {
        let mut p = Profile::new("m@x.org")
            .with_role(Role::Mentor)
            .with_hospital(hospital)
            .with_gender(Gender::Female)
            .with_language("English");
        p.age = age;
        p
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = MatchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_results, 9);
        assert_eq!(cfg.weights, ScoreWeights::default());
    }

    #[test]
    fn zero_max_results_rejected() {
        let err = MatchConfig::default()
            .with_max_results(0)
            .validate()
            .expect_err("config should be invalid");
        match err {
            MatchError::InvalidConfig(msg) => assert!(msg.contains("max_results")),
        }
    }

    #[test]
    fn partial_weights_fill_in_defaults() {
        let cfg: MatchConfig =
            serde_json::from_value(json!({ "weights": { "language_match": 40 } })).unwrap();
        assert_eq!(cfg.max_results, 9);
        assert_eq!(cfg.weights.language_match, 40);
        assert_eq!(cfg.weights.procedure_match, 100);
    }

    #[test]
    fn gender_filter_parses_any_case_insensitively() {
        assert_eq!("Any".parse::<GenderFilter>().unwrap(), GenderFilter::Any);
        assert_eq!("ANY".parse::<GenderFilter>().unwrap(), GenderFilter::Any);
        assert_eq!(
            "non-binary".parse::<GenderFilter>().unwrap(),
            GenderFilter::Only(Gender::NonBinary)
        );
        assert!("robot".parse::<GenderFilter>().is_err());
    }

    #[test]
    fn empty_filter_document_admits_everyone() {
        let filter: MatchFilter = serde_json::from_value(json!({})).unwrap();
        assert!(filter.is_unconstrained());
        assert!(filter.admits(&mentor("", None), &Profile::new("s@x.org")));
    }

    #[test]
    fn hospital_set_alias_is_accepted() {
        let filter: MatchFilter =
            serde_json::from_value(json!({ "hospital_set": ["Mayo Clinic"], "gender": "female" }))
                .unwrap();
        assert_eq!(filter.hospitals, vec!["Mayo Clinic".to_string()]);
        assert_eq!(filter.gender, GenderFilter::Only(Gender::Female));
    }

    #[test]
    fn unknown_age_fails_any_bound() {
        let seeker = Profile::new("s@x.org");
        let filter = MatchFilter::default().with_age_range(Some(30), None);
        assert!(!filter.admits(&mentor("", None), &seeker));
        assert!(filter.admits(&mentor("", Some(30)), &seeker));
        assert!(!filter.admits(&mentor("", Some(29)), &seeker));

        let upper = MatchFilter::default().with_age_range(None, Some(40));
        assert!(upper.admits(&mentor("", Some(40)), &seeker));
        assert!(!upper.admits(&mentor("", Some(41)), &seeker));
    }

    #[test]
    fn my_hospital_only_is_ignored_without_seeker_hospital() {
        let filter = MatchFilter::default().my_hospital_only();
        let anywhere = Profile::new("s@x.org");
        let at_mayo = Profile::new("s@x.org").with_hospital("Mayo Clinic");
        let candidate = mentor("Johns Hopkins", Some(50));
        assert!(filter.admits(&candidate, &anywhere));
        assert!(!filter.admits(&candidate, &at_mayo));
    }

    #[test]
    fn blank_language_means_no_constraint() {
        let seeker = Profile::new("s@x.org");
        let blank = MatchFilter::default().with_language("  ");
        assert!(blank.admits(&mentor("", None), &seeker));
        let spanish = MatchFilter::default().with_language("Spanish");
        assert!(!spanish.admits(&mentor("", None), &seeker));
    }
}
