//! Fixtures and failing collaborators shared by the unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::accounts::{
    Account, AccountDirectory, AccountId, AccountRepository, ApplicantProfile, CompanyProfile,
};
use crate::applications::{Application, ApplicationRepository, ApplicationTracker, TransitionPolicy};
use crate::jobs::{Job, JobCatalog, JobDetails, JobId, JobRepository, JobType};
use crate::saved::{MemorySavedJobStore, SavedJob, SavedJobStore, SavedJobsCache};
use crate::store::{MemoryDocumentStore, RepositoryError};

pub(crate) fn company(id: &str, name: &str) -> Account {
    Account::Company(CompanyProfile {
        id: AccountId::new(id),
        name: name.to_string(),
        website: format!("https://{id}.example.com"),
        phone: "+1 555 0100".to_string(),
        industry: "Software".to_string(),
        linkedin: String::new(),
    })
}

pub(crate) fn applicant(id: &str, name: &str) -> Account {
    Account::Applicant(ApplicantProfile {
        id: AccountId::new(id),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        phone: "+1 555 0199".to_string(),
        linkedin: format!("https://linkedin.com/in/{id}"),
        cv_link: format!("https://cv.example.com/{id}.pdf"),
    })
}

pub(crate) fn job_details(title: &str) -> JobDetails {
    JobDetails {
        title: title.to_string(),
        location: "Berlin".to_string(),
        salary: "80k".to_string(),
        description: "Build services".to_string(),
        responsibilities: "Own the API".to_string(),
        requirements: "Rust".to_string(),
        job_type: JobType::FullTime,
    }
}

pub(crate) type MemoryTracker =
    ApplicationTracker<MemoryDocumentStore, MemoryDocumentStore, MemoryDocumentStore>;

pub(crate) struct Board {
    pub(crate) store: Arc<MemoryDocumentStore>,
    pub(crate) directory: Arc<AccountDirectory<MemoryDocumentStore>>,
    pub(crate) catalog: Arc<JobCatalog<MemoryDocumentStore>>,
    pub(crate) tracker: Arc<MemoryTracker>,
}

impl Board {
    pub(crate) fn company(&self, id: &str, name: &str) -> AccountId {
        self.directory
            .create_profile(company(id, name))
            .expect("company created")
            .id()
            .clone()
    }

    pub(crate) fn applicant(&self, id: &str, name: &str) -> AccountId {
        self.directory
            .create_profile(applicant(id, name))
            .expect("applicant created")
            .id()
            .clone()
    }

    pub(crate) fn job(&self, company_id: &AccountId, title: &str) -> JobId {
        self.catalog
            .create_job(company_id, job_details(title))
            .expect("job created")
    }

    pub(crate) fn saved_jobs<S: SavedJobStore + 'static>(
        &self,
        owner: &AccountId,
        store: Arc<S>,
    ) -> SavedJobsCache<S, MemoryDocumentStore, MemoryDocumentStore> {
        SavedJobsCache::open(
            owner.clone(),
            store,
            self.catalog.clone(),
            self.directory.clone(),
        )
        .expect("cache opens")
    }
}

pub(crate) fn board() -> Board {
    board_with_policy(TransitionPolicy::Strict)
}

pub(crate) fn board_with_policy(policy: TransitionPolicy) -> Board {
    let store = Arc::new(MemoryDocumentStore::default());
    let directory = Arc::new(AccountDirectory::new(store.clone()));
    let catalog = Arc::new(JobCatalog::new(store.clone()));
    let tracker = Arc::new(ApplicationTracker::with_policy(
        store.clone(),
        catalog.clone(),
        directory.clone(),
        policy,
    ));
    Board {
        store,
        directory,
        catalog,
        tracker,
    }
}

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("backend offline".to_string()))
}

/// Every call fails as if the backend were unreachable.
pub(crate) struct UnavailableStore;

impl AccountRepository for UnavailableStore {
    fn insert(&self, _account: Account) -> Result<Account, RepositoryError> {
        offline()
    }

    fn update(&self, _account: Account) -> Result<(), RepositoryError> {
        offline()
    }

    fn fetch(&self, _id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        offline()
    }

    fn companies(&self) -> Result<Vec<CompanyProfile>, RepositoryError> {
        offline()
    }
}

impl JobRepository for UnavailableStore {
    fn insert(&self, _job: Job) -> Result<Job, RepositoryError> {
        offline()
    }

    fn fetch(&self, _id: &JobId) -> Result<Option<Job>, RepositoryError> {
        offline()
    }

    fn delete(&self, _id: &JobId) -> Result<(), RepositoryError> {
        offline()
    }

    fn by_company(&self, _company_id: &AccountId) -> Result<Vec<Job>, RepositoryError> {
        offline()
    }

    fn all(&self) -> Result<Vec<Job>, RepositoryError> {
        offline()
    }
}

impl ApplicationRepository for UnavailableStore {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        offline()
    }

    fn update(&self, _application: Application) -> Result<(), RepositoryError> {
        offline()
    }

    fn fetch(
        &self,
        _job_id: &JobId,
        _applicant_id: &AccountId,
    ) -> Result<Option<Application>, RepositoryError> {
        offline()
    }

    fn for_job(&self, _job_id: &JobId) -> Result<Vec<Application>, RepositoryError> {
        offline()
    }

    fn for_applicant(
        &self,
        _applicant_id: &AccountId,
    ) -> Result<Vec<Application>, RepositoryError> {
        offline()
    }
}

/// Saved-job store whose writes can be switched off mid-test.
#[derive(Default)]
pub(crate) struct FlakySavedJobStore {
    pub(crate) inner: MemorySavedJobStore,
    pub(crate) failing: AtomicBool,
}

impl FlakySavedJobStore {
    pub(crate) fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("disk full".to_string()));
        }
        Ok(())
    }
}

impl SavedJobStore for FlakySavedJobStore {
    fn insert(&self, owner: &AccountId, job: SavedJob) -> Result<(), RepositoryError> {
        self.check()?;
        self.inner.insert(owner, job)
    }

    fn delete(&self, owner: &AccountId, job_id: &JobId) -> Result<bool, RepositoryError> {
        self.check()?;
        self.inner.delete(owner, job_id)
    }

    fn all(&self, owner: &AccountId) -> Result<Vec<SavedJob>, RepositoryError> {
        self.inner.all(owner)
    }
}

pub(crate) fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("valid request")
}

pub(crate) fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
