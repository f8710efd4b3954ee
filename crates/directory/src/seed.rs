use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use profile::Profile;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{DirectoryError, InMemoryDirectory, UserDirectory};

/// How to build a directory at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// JSON array of profiles imported on startup. `None` starts empty.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl DirectoryConfig {
    pub fn with_seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(path.into());
        self
    }

    /// Build an in-memory directory, importing the seed file when configured.
    pub fn build(&self) -> Result<InMemoryDirectory, DirectoryError> {
        let directory = InMemoryDirectory::new();
        if let Some(path) = &self.seed_path {
            seed_from_path(&directory, path)?;
        }
        Ok(directory)
    }
}

/// Import a JSON array of profiles into `directory`.
///
/// Profiles go through [`UserDirectory::create`], so ids are reassigned and
/// emails must be unique. Returns the number of profiles imported. The import
/// stops at the first rejected profile.
pub fn load_seed<R: Read>(directory: &dyn UserDirectory, reader: R) -> Result<usize, DirectoryError> {
    let profiles: Vec<Profile> = serde_json::from_reader(reader).map_err(DirectoryError::seed)?;
    let count = profiles.len();
    for profile in profiles {
        directory.create(profile)?;
    }
    Ok(count)
}

/// [`load_seed`] reading from a file.
pub fn seed_from_path(directory: &dyn UserDirectory, path: &Path) -> Result<usize, DirectoryError> {
    let file = File::open(path)
        .map_err(|e| DirectoryError::Seed(format!("{}: {e}", path.display())))?;
    let count = load_seed(directory, BufReader::new(file))?;
    info!(path = %path.display(), count, "directory_seeded");
    Ok(count)
}
