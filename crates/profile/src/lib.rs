//! # HealLink Profiles (`profile`)
//!
//! ## Purpose
//!
//! `profile` owns the one record shape shared by mentors and mentees. It turns
//! the loosely-typed payloads coming from the client (free-text tags, catalog
//! labels, optional fields) into a [`Profile`] with an explicit [`Role`]
//! discriminant, normalised tag sets, and typed [`Stage`] / [`Gender`] values.
//!
//! The matcher never validates its inputs; callers run
//! [`Profile::validate_complete`] at the boundary before a profile is used as a
//! seeker.
//!
//! ## Core Types
//!
//! - [`Profile`]: identity, demographics, procedure context, tags, and intro.
//! - [`Role`]: which side of matching a profile plays.
//! - [`Stage`]: coarse recovery bucket (pre-op, post-op < 6mo, post-op ≥ 6mo).
//! - [`Gender`]: filter facet only; never a hard constraint on matching.
//! - [`Catalog`]: the fixed option lists offered by the profile form.
//! - [`ProfileError`]: validation failures.
//!
//! ## Example
//!
//! ```
//! use profile::{Profile, Role, Stage};
//!
//! let mentee = Profile::new("Sam@Example.com ")
//!     .with_name("Sam")
//!     .with_age(34)
//!     .with_role(Role::Mentee)
//!     .with_procedure("Liver transplant")
//!     .with_stage(Stage::PreOp)
//!     .with_language("English")
//!     .with_hospital("Mayo Clinic")
//!     .with_interests([" Anime", "music", "anime"])
//!     .with_intro("Waiting on a transplant date.");
//!
//! assert_eq!(mentee.email, "sam@example.com");
//! assert_eq!(mentee.interests.len(), 2);
//! assert!(mentee.validate_complete().is_ok());
//! ```

mod catalog;
mod error;
mod types;
mod validation;

pub use crate::catalog::Catalog;
pub use crate::error::ProfileError;
pub use crate::types::{
    normalize_availability, normalize_email, normalize_interest, Gender, Profile, ProfileId, Role,
    Stage, TagSet,
};
pub use crate::validation::MIN_AGE;
