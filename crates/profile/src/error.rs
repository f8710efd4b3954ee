//! Error types produced by profile normalisation and validation.
//!
//! Errors are typed, cloneable, and comparable so that the directory and the
//! HTTP layer can map each case to a precise response.
use thiserror::Error;

/// Errors raised while normalising or validating a [`Profile`](crate::Profile).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    /// Email is missing an `@`, has an empty local/domain part, or contains whitespace.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// One or more required fields are blank.
    #[error("profile is incomplete; missing {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    /// Age is present but below the adult minimum.
    #[error("profile age {age} is below the minimum age of 18")]
    Underage { age: u32 },

    /// A field holds a value outside its catalog.
    #[error("unknown {field} {value:?}")]
    UnknownValue { field: &'static str, value: String },

    /// Stage label could not be parsed.
    #[error("unknown recovery stage {0:?}")]
    InvalidStage(String),

    /// Gender label could not be parsed.
    #[error("unknown gender {0:?}")]
    InvalidGender(String),
}
