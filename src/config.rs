//! YAML configuration for an embedded HealLink matcher.
//!
//! Everything the matching core treats as injected tables lives here: the
//! scoring weights and result limit, the icebreaker policy, the form catalog,
//! and where the directory seeds from.
//!
//! ```yaml
//! version: "1.0"
//! name: "clinic pilot"
//!
//! matcher:
//!   max_results: 9
//!   weights:
//!     procedure_match: 100
//!     procedure_mismatch: -5
//!     stage_compatible: 50
//!     language_match: 15
//!     availability_overlap: 10
//!     per_shared_interest: 12
//!
//! icebreaker: table          # or random_template
//! strict_catalog: false
//!
//! directory:
//!   seed_path: data/mentors.json
//! ```
//!
//! Omitted sections fall back to their defaults; `catalog` defaults to the
//! built-in option lists.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use directory::{DirectoryConfig, DirectoryError, InMemoryDirectory};
use matcher::{Icebreaker, IcebreakerPolicy, MatchConfig, MatchError, Matcher};
use profile::{Catalog, Profile, ProfileError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

impl From<MatchError> for ConfigLoadError {
    fn from(err: MatchError) -> Self {
        ConfigLoadError::Validation(err.to_string())
    }
}

/// Top-level configuration for the matching core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealLinkConfig {
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub matcher: MatchConfig,

    #[serde(default)]
    pub icebreaker: IcebreakerPolicy,

    /// Reject profiles whose tags fall outside `catalog`.
    #[serde(default)]
    pub strict_catalog: bool,

    #[serde(default)]
    pub catalog: Catalog,

    #[serde(default)]
    pub directory: DirectoryConfig,
}

impl HealLinkConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: HealLinkConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;
        self.matcher.validate()?;
        if self.strict_catalog && self.catalog.procedures.is_empty() {
            return Err(ConfigLoadError::Validation(
                "strict_catalog requires a non-empty procedure list".into(),
            ));
        }
        Ok(())
    }

    pub fn build_matcher(&self) -> Result<Matcher, ConfigLoadError> {
        Ok(Matcher::new(self.matcher.clone())?)
    }

    /// Icebreaker named by the `icebreaker` policy.
    pub fn build_icebreaker(&self) -> Arc<dyn Icebreaker> {
        self.icebreaker.build()
    }

    /// In-memory directory, seeded from `directory.seed_path` when set.
    pub fn build_directory(&self) -> Result<InMemoryDirectory, DirectoryError> {
        self.directory.build()
    }

    /// Catalog check for profile writes. A no-op unless `strict_catalog` is on.
    pub fn check_profile(&self, profile: &Profile) -> Result<(), ProfileError> {
        if self.strict_catalog {
            profile.validate_against(&self.catalog)?;
        }
        Ok(())
    }
}

impl Default for HealLinkConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            matcher: MatchConfig::default(),
            icebreaker: IcebreakerPolicy::default(),
            strict_catalog: false,
            catalog: Catalog::default(),
            directory: DirectoryConfig::default(),
        }
    }
}
