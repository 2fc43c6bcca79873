use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use job_board::accounts::{AccountDirectory, AccountId, Authenticator};
use job_board::applications::ApplicationTracker;
use job_board::config::BoardConfig;
use job_board::jobs::{JobCatalog, JobId};
use job_board::saved::{
    JsonFileSavedJobStore, MemorySavedJobStore, SavedJob, SavedJobStore, SavedJobsBook,
};
use job_board::store::{MemoryCredentials, MemoryDocumentStore, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Saved-jobs backend chosen from configuration.
pub(crate) enum BoardSavedStore {
    Memory(MemorySavedJobStore),
    File(JsonFileSavedJobStore),
}

impl BoardSavedStore {
    pub(crate) fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => {
                info!(path = %path.display(), "persisting saved jobs to file");
                BoardSavedStore::File(JsonFileSavedJobStore::new(path))
            }
            None => BoardSavedStore::Memory(MemorySavedJobStore::default()),
        }
    }
}

impl SavedJobStore for BoardSavedStore {
    fn insert(&self, owner: &AccountId, job: SavedJob) -> Result<(), RepositoryError> {
        match self {
            BoardSavedStore::Memory(store) => store.insert(owner, job),
            BoardSavedStore::File(store) => store.insert(owner, job),
        }
    }

    fn delete(&self, owner: &AccountId, job_id: &JobId) -> Result<bool, RepositoryError> {
        match self {
            BoardSavedStore::Memory(store) => store.delete(owner, job_id),
            BoardSavedStore::File(store) => store.delete(owner, job_id),
        }
    }

    fn all(&self, owner: &AccountId) -> Result<Vec<SavedJob>, RepositoryError> {
        match self {
            BoardSavedStore::Memory(store) => store.all(owner),
            BoardSavedStore::File(store) => store.all(owner),
        }
    }
}

pub(crate) type BoardTracker =
    ApplicationTracker<MemoryDocumentStore, MemoryDocumentStore, MemoryDocumentStore>;
pub(crate) type BoardAuth = Authenticator<MemoryDocumentStore, MemoryCredentials>;
pub(crate) type BoardSavedJobs =
    SavedJobsBook<BoardSavedStore, MemoryDocumentStore, MemoryDocumentStore>;

/// Every service of the board wired over one in-memory document store.
#[derive(Clone)]
pub(crate) struct BoardServices {
    pub(crate) directory: Arc<AccountDirectory<MemoryDocumentStore>>,
    pub(crate) auth: Arc<BoardAuth>,
    pub(crate) catalog: Arc<JobCatalog<MemoryDocumentStore>>,
    pub(crate) tracker: Arc<BoardTracker>,
    pub(crate) saved: Arc<BoardSavedJobs>,
}

impl BoardServices {
    pub(crate) fn build(config: &BoardConfig) -> Self {
        let store = Arc::new(MemoryDocumentStore::default());
        let directory = Arc::new(AccountDirectory::new(store.clone()));
        let auth = Arc::new(Authenticator::new(
            directory.clone(),
            Arc::new(MemoryCredentials::default()),
        ));
        let catalog = Arc::new(JobCatalog::new(store.clone()));
        let tracker = Arc::new(ApplicationTracker::with_policy(
            store,
            catalog.clone(),
            directory.clone(),
            config.status_policy,
        ));
        let saved_store = Arc::new(BoardSavedStore::from_path(config.saved_jobs_path.clone()));
        let saved = Arc::new(SavedJobsBook::new(
            saved_store,
            catalog.clone(),
            directory.clone(),
        ));

        Self {
            directory,
            auth,
            catalog,
            tracker,
            saved,
        }
    }
}
