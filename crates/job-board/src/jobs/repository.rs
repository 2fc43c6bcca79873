use super::domain::{Job, JobId};
use crate::accounts::AccountId;
use crate::store::RepositoryError;

/// Storage abstraction for job postings.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn delete(&self, id: &JobId) -> Result<(), RepositoryError>;
    fn by_company(&self, company_id: &AccountId) -> Result<Vec<Job>, RepositoryError>;
    fn all(&self) -> Result<Vec<Job>, RepositoryError>;
}
