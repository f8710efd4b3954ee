use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ProfileError;
use crate::types::Profile;

/// Minimum age for any account.
pub const MIN_AGE: u32 = 18;

impl Profile {
    /// Check that the profile may be submitted to the matcher as a seeker.
    ///
    /// A complete profile has a non-blank name, procedure, stage, language,
    /// hospital, and intro, and an age of at least [`MIN_AGE`]. All missing
    /// fields are reported together.
    pub fn validate_complete(&self) -> Result<(), ProfileError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.age.is_none() {
            missing.push("age");
        }
        if self.procedure.trim().is_empty() {
            missing.push("procedure");
        }
        if self.stage.is_none() {
            missing.push("stage");
        }
        if self.language.trim().is_empty() {
            missing.push("language");
        }
        if self.hospital.trim().is_empty() {
            missing.push("hospital");
        }
        if self.intro.trim().is_empty() {
            missing.push("intro");
        }
        if !missing.is_empty() {
            debug!(email = %self.email, ?missing, "profile incomplete");
            return Err(ProfileError::Incomplete { missing });
        }

        match self.age {
            Some(age) if age < MIN_AGE => Err(ProfileError::Underage { age }),
            _ => Ok(()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate_complete().is_ok()
    }

    /// Check catalog membership of every catalog-backed field that is set.
    ///
    /// Blank fields are skipped; completeness is a separate check.
    pub fn validate_against(&self, catalog: &Catalog) -> Result<(), ProfileError> {
        let checks: [(&'static str, &str, &[String]); 4] = [
            ("procedure", self.procedure.as_str(), &catalog.procedures),
            ("language", self.language.as_str(), &catalog.languages),
            ("timezone", self.timezone.as_str(), &catalog.timezones),
            ("hospital", self.hospital.as_str(), &catalog.hospitals),
        ];
        for (field, value, allowed) in checks {
            if !value.is_empty() && !allowed.iter().any(|a| a == value) {
                return Err(ProfileError::UnknownValue {
                    field,
                    value: value.to_string(),
                });
            }
        }

        if let Some(slot) = self
            .availability
            .iter()
            .find(|slot| !catalog.availability.contains(*slot))
        {
            return Err(ProfileError::UnknownValue {
                field: "availability",
                value: slot.clone(),
            });
        }

        if let Some(tag) = self
            .interests
            .iter()
            .find(|tag| !catalog.interests.contains(*tag))
        {
            return Err(ProfileError::UnknownValue {
                field: "interests",
                value: tag.clone(),
            });
        }

        Ok(())
    }
}
