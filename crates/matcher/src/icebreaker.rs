//! Conversation starters for a freshly matched pair.
//!
//! Two strategies sit behind the [`Icebreaker`] trait:
//!
//! - [`TableIcebreaker`] (default) is deterministic: the first shared interest
//!   picks a canned opener, then the seeker's procedure fills a template, then
//!   a generic invitation closes the chain.
//! - [`TemplateIcebreaker`] picks one of ten templates uniformly at random and
//!   fills in the mentor's name and the procedure.
//!
//! [`IcebreakerPolicy`] names a strategy so it can be chosen from config.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use profile::{normalize_interest, Profile};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::MatchError;

/// Returned when neither a shared interest nor a procedure is available.
pub const FALLBACK_OPENER: &str =
    "Say hi and share why you signed up; one small question is enough to start.";

const DEFAULT_OPENERS: [(&str, &str); 12] = [
    ("anime", "You both mentioned anime—maybe ask what show helped them through recovery."),
    ("gaming", "You both enjoy gaming—what cozy game worked well post-op?"),
    ("music", "You both like music—favorite calm playlist for tough days?"),
    ("reading", "You both read—any book recs that made hospital time easier?"),
    ("cooking", "You both cook—go-to easy recipe during recovery?"),
    ("fitness", "You both value fitness—what gentle movement helped first?"),
    ("pets", "You both love pets—did caring for a pet affect recovery?"),
    ("travel", "You both travel—tips for first trip after surgery?"),
    ("movies", "You both watch movies—any comfort films for bad days?"),
    ("art", "You both like art—creative activities that reduced stress?"),
    ("photography", "You both do photography—walk ideas to rebuild stamina?"),
    ("gardening", "You both garden—light tasks safe in early weeks?"),
];

const TEMPLATES: [&str; 10] = [
    "Hi {name}! I'm getting ready for {procedure} and would love to hear how your first week went.",
    "Hey {name}, what do you wish someone had told you before your {procedure}?",
    "Hi {name}, how did you handle the first few days after {procedure}?",
    "Hello {name}! What helped most with the nerves before {procedure}?",
    "Hi {name}, any tips for packing a hospital bag for {procedure}?",
    "Hey {name}! How long before you felt like yourself again after {procedure}?",
    "Hi {name}, which questions should I bring to my care team about {procedure}?",
    "Hello {name}, what did a normal day look like while you recovered from {procedure}?",
    "Hi {name}! Did anything surprise you about recovering from {procedure}?",
    "Hey {name}, how did you keep your spirits up during {procedure} recovery?",
];

static DEFAULT_TABLE: Lazy<TableIcebreaker> = Lazy::new(TableIcebreaker::default);

/// Per-pair inputs an icebreaker may use besides the shared interests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcebreakerContext {
    #[serde(default)]
    pub procedure: Option<String>,
    #[serde(default)]
    pub candidate_name: Option<String>,
}

impl IcebreakerContext {
    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = Some(procedure.into());
        self
    }

    pub fn with_candidate_name(mut self, name: impl Into<String>) -> Self {
        self.candidate_name = Some(name.into());
        self
    }

    /// Context for a seeker/candidate pair: the seeker's procedure and the
    /// candidate's display name. Blank values stay unset.
    pub fn for_pair(seeker: &Profile, candidate: &Profile) -> Self {
        Self {
            procedure: non_blank(&seeker.procedure),
            candidate_name: non_blank(&candidate.name),
        }
    }

    fn procedure(&self) -> Option<&str> {
        self.procedure.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Strategy producing one conversation starter.
pub trait Icebreaker: Send + Sync {
    /// Stable strategy name used in logs and responses.
    fn name(&self) -> &'static str;

    fn suggest(&self, shared_interests: &[&str], context: &IcebreakerContext) -> String;
}

/// Interest tag to opener sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenerTable(IndexMap<String, String>);

impl OpenerTable {
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    /// Add or replace the opener for `interest` (normalised like profile tags).
    pub fn insert(&mut self, interest: &str, opener: impl Into<String>) {
        if let Some(tag) = normalize_interest(interest) {
            self.0.insert(tag, opener.into());
        }
    }

    pub fn get(&self, interest: &str) -> Option<&str> {
        let tag = normalize_interest(interest)?;
        self.0.get(&tag).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for OpenerTable {
    fn default() -> Self {
        DEFAULT_OPENERS.iter().copied().collect()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for OpenerTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = OpenerTable::empty();
        for (interest, opener) in iter {
            table.insert(interest.as_ref(), opener);
        }
        table
    }
}

/// Deterministic opener lookup with procedure and generic fallbacks.
#[derive(Debug, Clone, Default)]
pub struct TableIcebreaker {
    table: OpenerTable,
}

impl TableIcebreaker {
    pub fn new(table: OpenerTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &OpenerTable {
        &self.table
    }
}

impl Icebreaker for TableIcebreaker {
    fn name(&self) -> &'static str {
        "table"
    }

    fn suggest(&self, shared_interests: &[&str], context: &IcebreakerContext) -> String {
        // Only the first shared interest is consulted.
        if let Some(opener) = shared_interests.first().and_then(|tag| self.table.get(tag)) {
            return opener.to_string();
        }
        match context.procedure() {
            Some(procedure) => format!(
                "You share the {procedure} journey—maybe start with what week you’re on and any med side‑effects."
            ),
            None => FALLBACK_OPENER.to_string(),
        }
    }
}

/// Uniform random choice among ten name/procedure templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateIcebreaker;

impl TemplateIcebreaker {
    pub const TEMPLATE_COUNT: usize = TEMPLATES.len();

    /// Same as [`Icebreaker::suggest`] but drawing from `rng`.
    pub fn suggest_with<R: Rng + ?Sized>(&self, rng: &mut R, context: &IcebreakerContext) -> String {
        let template = TEMPLATES.choose(rng).copied().unwrap_or(FALLBACK_OPENER);
        Self::fill(template, context)
    }

    /// Every template filled for `context`, in template order.
    pub fn all_for(context: &IcebreakerContext) -> Vec<String> {
        TEMPLATES.iter().map(|t| Self::fill(t, context)).collect()
    }

    fn fill(template: &str, context: &IcebreakerContext) -> String {
        let name = context
            .candidate_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("there");
        let procedure = context.procedure().unwrap_or("your procedure");
        template
            .replace("{name}", name)
            .replace("{procedure}", procedure)
    }
}

impl Icebreaker for TemplateIcebreaker {
    fn name(&self) -> &'static str {
        "random_template"
    }

    fn suggest(&self, _shared_interests: &[&str], context: &IcebreakerContext) -> String {
        self.suggest_with(&mut rand::rng(), context)
    }
}

/// Named icebreaker strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IcebreakerPolicy {
    #[default]
    Table,
    RandomTemplate,
}

impl IcebreakerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IcebreakerPolicy::Table => "table",
            IcebreakerPolicy::RandomTemplate => "random_template",
        }
    }

    pub fn build(self) -> Arc<dyn Icebreaker> {
        match self {
            IcebreakerPolicy::Table => Arc::new(TableIcebreaker::default()),
            IcebreakerPolicy::RandomTemplate => Arc::new(TemplateIcebreaker),
        }
    }
}

impl fmt::Display for IcebreakerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IcebreakerPolicy {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "table" => Ok(IcebreakerPolicy::Table),
            "random_template" | "random" | "template" => Ok(IcebreakerPolicy::RandomTemplate),
            other => Err(MatchError::InvalidConfig(format!(
                "unknown icebreaker policy '{other}'"
            ))),
        }
    }
}

/// Deterministic suggestion using the default opener table.
pub fn suggest(shared_interests: &[&str], context: &IcebreakerContext) -> String {
    DEFAULT_TABLE.suggest(shared_interests, context)
}
