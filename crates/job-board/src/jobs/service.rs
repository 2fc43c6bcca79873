use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{Job, JobDetails, JobId};
use super::repository::JobRepository;
use crate::accounts::AccountId;
use crate::store::RepositoryError;

/// Owns job postings scoped per company.
pub struct JobCatalog<J> {
    jobs: Arc<J>,
}

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

impl<J> JobCatalog<J>
where
    J: JobRepository + 'static,
{
    pub fn new(jobs: Arc<J>) -> Self {
        Self { jobs }
    }

    /// Store a new posting under the company and return its generated id.
    pub fn create_job(
        &self,
        company_id: &AccountId,
        details: JobDetails,
    ) -> Result<JobId, CatalogError> {
        if company_id.is_blank() {
            return Err(CatalogError::MissingCompany);
        }

        let job = Job {
            id: next_job_id(),
            company_id: company_id.clone(),
            details,
            posted_at: Utc::now(),
        };
        let stored = self.jobs.insert(job)?;
        info!(job_id = %stored.id, company_id = %company_id, "job created");
        Ok(stored.id)
    }

    pub fn get_job(&self, company_id: &AccountId, job_id: &JobId) -> Result<Job, CatalogError> {
        let job = self.locate(job_id)?;
        if &job.company_id != company_id {
            return Err(CatalogError::PermissionDenied);
        }
        Ok(job)
    }

    /// Unscoped lookup by id.
    pub fn locate(&self, job_id: &JobId) -> Result<Job, CatalogError> {
        self.jobs.fetch(job_id)?.ok_or(CatalogError::NotFound)
    }

    pub fn list_jobs(&self, company_id: &AccountId) -> Result<Vec<Job>, CatalogError> {
        let jobs = self.jobs.by_company(company_id)?;
        Ok(listable(jobs))
    }

    pub fn list_all_jobs(&self) -> Result<Vec<Job>, CatalogError> {
        let jobs = self.jobs.all()?;
        Ok(listable(jobs))
    }

    pub fn delete_job(&self, company_id: &AccountId, job_id: &JobId) -> Result<(), CatalogError> {
        self.get_job(company_id, job_id)?;
        self.jobs.delete(job_id)?;
        info!(job_id = %job_id, company_id = %company_id, "job deleted");
        Ok(())
    }
}

/// Drops blank-title postings and orders newest first.
fn listable(jobs: Vec<Job>) -> Vec<Job> {
    let total = jobs.len();
    let mut visible: Vec<Job> = jobs.into_iter().filter(Job::is_listable).collect();
    if visible.len() != total {
        debug!(hidden = total - visible.len(), "filtered blank-title jobs");
    }
    visible.sort_by(|a, b| b.posted_at.cmp(&a.posted_at).then_with(|| a.id.cmp(&b.id)));
    visible
}

/// Error raised by the job catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("job not found")]
    NotFound,
    #[error("job belongs to another company")]
    PermissionDenied,
    #[error("company id is required")]
    MissingCompany,
    #[error("job id already exists")]
    Conflict,
    #[error("job store unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Unavailable(_))
    }

    pub fn user_message(&self) -> String {
        match self {
            CatalogError::NotFound => "Job not found".to_string(),
            CatalogError::PermissionDenied => "You can only manage your own jobs.".to_string(),
            CatalogError::MissingCompany => "Company id is required.".to_string(),
            CatalogError::Conflict => "Job already exists.".to_string(),
            CatalogError::Unavailable(_) => "Service is unavailable. Please try again.".to_string(),
        }
    }
}

impl From<RepositoryError> for CatalogError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict => CatalogError::Conflict,
            RepositoryError::NotFound => CatalogError::NotFound,
            RepositoryError::Unavailable(reason) => CatalogError::Unavailable(reason),
        }
    }
}
