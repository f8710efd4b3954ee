use profile::{ProfileError, ProfileId};
use thiserror::Error;

/// Errors produced by a [`crate::UserDirectory`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DirectoryError {
    /// Another profile already owns this (normalised) email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("profile {0} not found")]
    NotFound(ProfileId),
    /// The profile itself is malformed (currently: a bad email).
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] ProfileError),
    /// Seed data could not be read or parsed.
    #[error("seed error: {0}")]
    Seed(String),
    /// Storage failure such as a poisoned lock.
    #[error("backend error: {0}")]
    Backend(String),
}

impl DirectoryError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }

    pub fn seed<E: std::fmt::Display>(err: E) -> Self {
        Self::Seed(err.to_string())
    }
}
