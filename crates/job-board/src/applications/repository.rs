use super::domain::Application;
use crate::accounts::AccountId;
use crate::jobs::JobId;
use crate::store::RepositoryError;

/// Storage abstraction for applications, keyed by (job id, applicant id).
pub trait ApplicationRepository: Send + Sync {
    /// Keyed create; fails with `Conflict` when the pair already exists.
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    fn fetch(
        &self,
        job_id: &JobId,
        applicant_id: &AccountId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn for_job(&self, job_id: &JobId) -> Result<Vec<Application>, RepositoryError>;
    fn for_applicant(&self, applicant_id: &AccountId)
        -> Result<Vec<Application>, RepositoryError>;
}
