//! Local persistence behind the saved-jobs caches.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::domain::SavedJob;
use crate::accounts::AccountId;
use crate::jobs::JobId;
use crate::store::RepositoryError;

/// Key-value table of saved jobs, partitioned by the owning applicant and keyed by job id.
pub trait SavedJobStore: Send + Sync {
    /// Insert or replace the owner's entry for `job.id`.
    fn insert(&self, owner: &AccountId, job: SavedJob) -> Result<(), RepositoryError>;
    /// Returns whether an entry was removed.
    fn delete(&self, owner: &AccountId, job_id: &JobId) -> Result<bool, RepositoryError>;
    fn all(&self, owner: &AccountId) -> Result<Vec<SavedJob>, RepositoryError>;
}

#[derive(Default, Clone)]
pub struct MemorySavedJobStore {
    entries: Arc<Mutex<HashMap<AccountId, Vec<SavedJob>>>>,
}

impl SavedJobStore for MemorySavedJobStore {
    fn insert(&self, owner: &AccountId, job: SavedJob) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("saved job mutex poisoned");
        upsert(guard.entry(owner.clone()).or_default(), job);
        Ok(())
    }

    fn delete(&self, owner: &AccountId, job_id: &JobId) -> Result<bool, RepositoryError> {
        let mut guard = self.entries.lock().expect("saved job mutex poisoned");
        let Some(entries) = guard.get_mut(owner) else {
            return Ok(false);
        };
        let before = entries.len();
        entries.retain(|entry| &entry.id != job_id);
        Ok(entries.len() != before)
    }

    fn all(&self, owner: &AccountId) -> Result<Vec<SavedJob>, RepositoryError> {
        let guard = self.entries.lock().expect("saved job mutex poisoned");
        Ok(guard.get(owner).cloned().unwrap_or_default())
    }
}

type SavedJobTable = BTreeMap<AccountId, Vec<SavedJob>>;

/// JSON file table holding every applicant's entries. Every write rewrites the whole file
/// through a temp file rename.
pub struct JsonFileSavedJobStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileSavedJobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SavedJobTable, RepositoryError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(SavedJobTable::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                RepositoryError::Unavailable(format!(
                    "corrupt saved jobs file {}: {err}",
                    self.path.display()
                ))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(SavedJobTable::new()),
            Err(err) => Err(io_unavailable(&self.path, err)),
        }
    }

    fn write(&self, table: &SavedJobTable) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| io_unavailable(parent, err))?;
        }
        let body = serde_json::to_vec_pretty(table)
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, body).map_err(|err| io_unavailable(&staging, err))?;
        fs::rename(&staging, &self.path).map_err(|err| io_unavailable(&self.path, err))
    }
}

impl SavedJobStore for JsonFileSavedJobStore {
    fn insert(&self, owner: &AccountId, job: SavedJob) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().expect("saved job file mutex poisoned");
        let mut table = self.read()?;
        upsert(table.entry(owner.clone()).or_default(), job);
        self.write(&table)
    }

    fn delete(&self, owner: &AccountId, job_id: &JobId) -> Result<bool, RepositoryError> {
        let _guard = self.lock.lock().expect("saved job file mutex poisoned");
        let mut table = self.read()?;
        let Some(entries) = table.get_mut(owner) else {
            return Ok(false);
        };
        let before = entries.len();
        entries.retain(|entry| &entry.id != job_id);
        if entries.len() == before {
            return Ok(false);
        }
        if entries.is_empty() {
            table.remove(owner);
        }
        self.write(&table)?;
        Ok(true)
    }

    fn all(&self, owner: &AccountId) -> Result<Vec<SavedJob>, RepositoryError> {
        let _guard = self.lock.lock().expect("saved job file mutex poisoned");
        Ok(self.read()?.remove(owner).unwrap_or_default())
    }
}

fn upsert(entries: &mut Vec<SavedJob>, job: SavedJob) {
    match entries.iter_mut().find(|entry| entry.id == job.id) {
        Some(existing) => *existing = job,
        None => entries.push(job),
    }
}

fn io_unavailable(path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::Unavailable(format!("{}: {err}", path.display()))
}
