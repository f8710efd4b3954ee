//! # HealLink Directory (`directory`)
//!
//! Profile storage for the match boundary. [`UserDirectory`] is the seam:
//! lookup by email, create (assigns ids, enforces unique emails), get, update,
//! delete, list-all and the mentor subset used as the candidate pool.
//!
//! [`InMemoryDirectory`] is the bundled backend. [`DirectoryConfig`] builds one
//! and optionally imports a JSON seed file via [`load_seed`].
//!
//! ```
//! use directory::{InMemoryDirectory, UserDirectory};
//! use profile::{Profile, Role};
//!
//! let dir = InMemoryDirectory::new();
//! let mentor = dir
//!     .create(Profile::new("Alex@Example.com").with_role(Role::Mentor))
//!     .unwrap();
//! assert_eq!(mentor.id, Some(1));
//! assert_eq!(dir.find_by_email("alex@example.com").unwrap(), Some(mentor));
//! assert_eq!(dir.list_mentors().unwrap().len(), 1);
//! ```

mod backend;
mod error;
mod seed;

pub use crate::backend::{InMemoryDirectory, UserDirectory};
pub use crate::error::DirectoryError;
pub use crate::seed::{load_seed, seed_from_path, DirectoryConfig};
