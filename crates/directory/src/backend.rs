use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use profile::{normalize_email, Profile, ProfileId};
use tracing::{debug, info};

use crate::DirectoryError;

/// Profile storage consumed by the match boundary.
///
/// Implementations own id assignment and email uniqueness; callers hand in
/// profiles and get back the stored copy.
pub trait UserDirectory: Send + Sync {
    /// Look a profile up by email (normalised before comparison).
    fn find_by_email(&self, email: &str) -> Result<Option<Profile>, DirectoryError>;
    fn get(&self, id: ProfileId) -> Result<Option<Profile>, DirectoryError>;
    /// Store a new profile and assign it an id. Any id on the input is ignored.
    fn create(&self, profile: Profile) -> Result<Profile, DirectoryError>;
    /// Replace the profile stored under `id`, keeping the id.
    fn update(&self, id: ProfileId, profile: Profile) -> Result<Profile, DirectoryError>;
    /// Remove a profile. Returns whether anything was removed.
    fn delete(&self, id: ProfileId) -> Result<bool, DirectoryError>;
    /// Every profile, ordered by id.
    fn list_all(&self) -> Result<Vec<Profile>, DirectoryError>;

    /// Mentor subset of [`UserDirectory::list_all`]; the candidate pool.
    fn list_mentors(&self) -> Result<Vec<Profile>, DirectoryError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(Profile::is_mentor)
            .collect())
    }

    fn len(&self) -> Result<usize, DirectoryError> {
        Ok(self.list_all()?.len())
    }
}

#[derive(Debug, Default)]
struct Records {
    next_id: ProfileId,
    by_id: BTreeMap<ProfileId, Profile>,
    by_email: HashMap<String, ProfileId>,
}

/// An in-memory directory using a `RwLock` around id and email maps.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    records: RwLock<Records>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, DirectoryError> {
        self.records
            .read()
            .map_err(|_| DirectoryError::backend("poisoned lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>, DirectoryError> {
        self.records
            .write()
            .map_err(|_| DirectoryError::backend("poisoned lock"))
    }
}

impl UserDirectory for InMemoryDirectory {
    fn find_by_email(&self, email: &str) -> Result<Option<Profile>, DirectoryError> {
        // A malformed email cannot be registered, so it is simply not found.
        let Ok(email) = normalize_email(email) else {
            return Ok(None);
        };
        let guard = self.read()?;
        Ok(guard
            .by_email
            .get(&email)
            .and_then(|id| guard.by_id.get(id))
            .cloned())
    }

    fn get(&self, id: ProfileId) -> Result<Option<Profile>, DirectoryError> {
        Ok(self.read()?.by_id.get(&id).cloned())
    }

    fn create(&self, mut profile: Profile) -> Result<Profile, DirectoryError> {
        profile.email = normalize_email(&profile.email)?;

        // A single write lock covers the uniqueness check and the insert.
        let mut guard = self.write()?;
        if guard.by_email.contains_key(&profile.email) {
            return Err(DirectoryError::DuplicateEmail(profile.email));
        }
        guard.next_id += 1;
        let id = guard.next_id;
        profile.id = Some(id);
        guard.by_email.insert(profile.email.clone(), id);
        guard.by_id.insert(id, profile.clone());

        info!(profile_id = id, role = %profile.role, "directory_create");
        Ok(profile)
    }

    fn update(&self, id: ProfileId, mut profile: Profile) -> Result<Profile, DirectoryError> {
        profile.email = normalize_email(&profile.email)?;
        profile.id = Some(id);

        let mut guard = self.write()?;
        let previous_email = match guard.by_id.get(&id) {
            Some(existing) => existing.email.clone(),
            None => return Err(DirectoryError::NotFound(id)),
        };
        if previous_email != profile.email {
            if guard.by_email.contains_key(&profile.email) {
                return Err(DirectoryError::DuplicateEmail(profile.email));
            }
            guard.by_email.remove(&previous_email);
            guard.by_email.insert(profile.email.clone(), id);
        }
        guard.by_id.insert(id, profile.clone());

        debug!(profile_id = id, "directory_update");
        Ok(profile)
    }

    fn delete(&self, id: ProfileId) -> Result<bool, DirectoryError> {
        let mut guard = self.write()?;
        let Some(removed) = guard.by_id.remove(&id) else {
            return Ok(false);
        };
        guard.by_email.remove(&removed.email);

        info!(profile_id = id, "directory_delete");
        Ok(true)
    }

    fn list_all(&self) -> Result<Vec<Profile>, DirectoryError> {
        Ok(self.read()?.by_id.values().cloned().collect())
    }

    fn len(&self) -> Result<usize, DirectoryError> {
        Ok(self.read()?.by_id.len())
    }
}
