use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::domain::{SavedJob, SavedJobChange};
use super::store::SavedJobStore;
use crate::accounts::{
    AccountDirectory, AccountId, AccountKind, AccountRepository, DirectoryError,
};
use crate::jobs::{CatalogError, Job, JobCatalog, JobId, JobRepository, UNKNOWN_COMPANY};
use crate::store::RepositoryError;

/// One applicant's bookmark set, backed by a local store and mirrored to subscribers.
///
/// Every mutation holds `entries` for its whole check-and-write, persists first, and only
/// then publishes the new set. A failed write leaves the published set untouched.
pub struct SavedJobsCache<S, J, R> {
    owner: AccountId,
    store: Arc<S>,
    catalog: Arc<JobCatalog<J>>,
    directory: Arc<AccountDirectory<R>>,
    entries: Mutex<Vec<SavedJob>>,
    feed: watch::Sender<Vec<SavedJob>>,
}

impl<S, J, R> SavedJobsCache<S, J, R>
where
    S: SavedJobStore + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    /// Load the owner's current entries from the store and start publishing.
    pub fn open(
        owner: AccountId,
        store: Arc<S>,
        catalog: Arc<JobCatalog<J>>,
        directory: Arc<AccountDirectory<R>>,
    ) -> Result<Self, SavedJobsError> {
        let entries = store.all(&owner).map_err(SavedJobsError::Persistence)?;
        let (feed, _) = watch::channel(entries.clone());
        Ok(Self {
            owner,
            store,
            catalog,
            directory,
            entries: Mutex::new(entries),
            feed,
        })
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Subscribe to the saved set. Each subscriber starts from the current state, so a
    /// dropped feed can be restarted by calling `list` again.
    pub fn list(&self) -> SavedJobsFeed {
        SavedJobsFeed {
            receiver: self.feed.subscribe(),
        }
    }

    pub fn snapshot(&self) -> Vec<SavedJob> {
        self.entries.lock().expect("saved jobs mutex poisoned").clone()
    }

    pub fn is_saved(&self, job_id: &JobId) -> bool {
        self.entries
            .lock()
            .expect("saved jobs mutex poisoned")
            .iter()
            .any(|entry| &entry.id == job_id)
    }

    /// Bookmark a job. Saving an already saved job returns the existing entry.
    pub fn save(&self, job_id: &JobId) -> Result<SavedJob, SavedJobsError> {
        let mut entries = self.entries.lock().expect("saved jobs mutex poisoned");
        if let Some(existing) = entries.iter().find(|entry| &entry.id == job_id) {
            return Ok(existing.clone());
        }
        self.insert_locked(&mut entries, job_id)
    }

    /// Drop a bookmark. Removing an entry that is not saved is a no-op.
    pub fn remove(&self, saved: &SavedJob) -> Result<JobId, SavedJobsError> {
        let mut entries = self.entries.lock().expect("saved jobs mutex poisoned");
        self.delete_locked(&mut entries, &saved.id)?;
        Ok(saved.id.clone())
    }

    /// Flip the saved state of a job as a single step.
    pub fn toggle(&self, job_id: &JobId) -> Result<SavedJobChange, SavedJobsError> {
        let mut entries = self.entries.lock().expect("saved jobs mutex poisoned");
        if entries.iter().any(|entry| &entry.id == job_id) {
            self.delete_locked(&mut entries, job_id)?;
            Ok(SavedJobChange::Removed {
                job_id: job_id.clone(),
            })
        } else {
            let job = self.insert_locked(&mut entries, job_id)?;
            Ok(SavedJobChange::Saved { job })
        }
    }

    fn insert_locked(
        &self,
        entries: &mut Vec<SavedJob>,
        job_id: &JobId,
    ) -> Result<SavedJob, SavedJobsError> {
        let job = match self.catalog.locate(job_id) {
            Ok(job) => job,
            Err(CatalogError::NotFound) => return Err(SavedJobsError::JobNotFound(job_id.clone())),
            Err(other) => return Err(SavedJobsError::Catalog(other)),
        };
        let saved = SavedJob::from_job(&job, self.company_name(&job), Utc::now());

        if let Err(error) = self.store.insert(&self.owner, saved.clone()) {
            warn!(
                applicant_id = %self.owner,
                job_id = %job_id,
                %error,
                "failed to persist saved job"
            );
            return Err(SavedJobsError::Persistence(error));
        }

        entries.push(saved.clone());
        self.publish(entries);
        info!(applicant_id = %self.owner, job_id = %job_id, "job saved");
        Ok(saved)
    }

    fn delete_locked(
        &self,
        entries: &mut Vec<SavedJob>,
        job_id: &JobId,
    ) -> Result<(), SavedJobsError> {
        if let Err(error) = self.store.delete(&self.owner, job_id) {
            warn!(
                applicant_id = %self.owner,
                job_id = %job_id,
                %error,
                "failed to delete saved job"
            );
            return Err(SavedJobsError::Persistence(error));
        }

        let before = entries.len();
        entries.retain(|entry| &entry.id != job_id);
        if entries.len() != before {
            self.publish(entries);
            info!(applicant_id = %self.owner, job_id = %job_id, "job unsaved");
        }
        Ok(())
    }

    /// A missing or unreachable company profile only degrades the display name.
    fn company_name(&self, job: &Job) -> String {
        match self
            .directory
            .get_profile(AccountKind::Company, &job.company_id)
        {
            Ok(account) => account.name().to_string(),
            Err(error) => {
                debug!(company_id = %job.company_id, %error, "company name unavailable");
                UNKNOWN_COMPANY.to_string()
            }
        }
    }

    fn publish(&self, entries: &[SavedJob]) {
        self.feed.send_replace(entries.to_vec());
    }
}

/// Push-updated view of one applicant's saved set.
pub struct SavedJobsFeed {
    receiver: watch::Receiver<Vec<SavedJob>>,
}

impl SavedJobsFeed {
    pub fn current(&self) -> Vec<SavedJob> {
        self.receiver.borrow().clone()
    }

    pub fn contains(&self, job_id: &JobId) -> bool {
        self.receiver.borrow().iter().any(|entry| &entry.id == job_id)
    }

    /// Wait for the next published state. Returns `None` once the cache is gone.
    pub async fn changed(&mut self) -> Option<Vec<SavedJob>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

/// Saved-job caches for every applicant, opened on first use and shared afterwards.
pub struct SavedJobsBook<S, J, R> {
    store: Arc<S>,
    catalog: Arc<JobCatalog<J>>,
    directory: Arc<AccountDirectory<R>>,
    caches: Mutex<HashMap<AccountId, Arc<SavedJobsCache<S, J, R>>>>,
}

impl<S, J, R> SavedJobsBook<S, J, R>
where
    S: SavedJobStore + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    pub fn new(
        store: Arc<S>,
        catalog: Arc<JobCatalog<J>>,
        directory: Arc<AccountDirectory<R>>,
    ) -> Self {
        Self {
            store,
            catalog,
            directory,
            caches: Mutex::new(HashMap::new()),
        }
    }

    /// The cache owned by `applicant_id`. Only applicant accounts keep saved jobs.
    pub fn for_applicant(
        &self,
        applicant_id: &AccountId,
    ) -> Result<Arc<SavedJobsCache<S, J, R>>, SavedJobsError> {
        let mut caches = self.caches.lock().expect("saved jobs book mutex poisoned");
        if let Some(cache) = caches.get(applicant_id) {
            return Ok(Arc::clone(cache));
        }

        match self
            .directory
            .get_profile(AccountKind::Applicant, applicant_id)
        {
            Ok(_) => {}
            Err(DirectoryError::NotFound) => {
                return Err(SavedJobsError::UnknownApplicant(applicant_id.clone()))
            }
            Err(other) => return Err(SavedJobsError::Directory(other)),
        }

        let cache = Arc::new(SavedJobsCache::open(
            applicant_id.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.catalog),
            Arc::clone(&self.directory),
        )?);
        caches.insert(applicant_id.clone(), Arc::clone(&cache));
        debug!(applicant_id = %applicant_id, "opened saved jobs cache");
        Ok(cache)
    }
}

/// Error raised by the saved-jobs cache. None of these are fatal to the caller's session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavedJobsError {
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("applicant {0} not found")]
    UnknownApplicant(AccountId),
    #[error(transparent)]
    Catalog(CatalogError),
    #[error(transparent)]
    Directory(DirectoryError),
    #[error("saved jobs store failed: {0}")]
    Persistence(RepositoryError),
}

impl SavedJobsError {
    pub fn user_message(&self) -> String {
        match self {
            SavedJobsError::JobNotFound(_) => "Job not found".to_string(),
            SavedJobsError::UnknownApplicant(_) => "User profile not found.".to_string(),
            SavedJobsError::Catalog(error) => error.user_message(),
            SavedJobsError::Directory(error) => error.user_message(),
            SavedJobsError::Persistence(_) => {
                "Could not update saved jobs. Please try again.".to_string()
            }
        }
    }
}
