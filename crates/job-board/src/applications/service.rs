use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    ApplicantSnapshot, Application, ApplicationStatus, ApplyOutcome, TransitionPolicy,
};
use super::repository::ApplicationRepository;
use crate::accounts::{AccountDirectory, AccountId, AccountRepository, DirectoryError};
use crate::jobs::{CatalogError, JobCatalog, JobId, JobRepository};
use crate::store::RepositoryError;

/// Service composing the application store with the catalog and account directory.
pub struct ApplicationTracker<A, J, R> {
    applications: Arc<A>,
    catalog: Arc<JobCatalog<J>>,
    directory: Arc<AccountDirectory<R>>,
    policy: TransitionPolicy,
}

impl<A, J, R> ApplicationTracker<A, J, R>
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    pub fn new(
        applications: Arc<A>,
        catalog: Arc<JobCatalog<J>>,
        directory: Arc<AccountDirectory<R>>,
    ) -> Self {
        Self::with_policy(applications, catalog, directory, TransitionPolicy::default())
    }

    pub fn with_policy(
        applications: Arc<A>,
        catalog: Arc<JobCatalog<J>>,
        directory: Arc<AccountDirectory<R>>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            applications,
            catalog,
            directory,
            policy,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Record an application with the given snapshot. The first write for an
    /// (applicant, job) pair wins; later calls return the stored record untouched.
    pub fn apply(
        &self,
        company_id: &AccountId,
        job_id: &JobId,
        applicant_id: &AccountId,
        snapshot: ApplicantSnapshot,
    ) -> Result<ApplyOutcome, TrackerError> {
        if applicant_id.is_blank() || !snapshot.is_complete() {
            return Err(TrackerError::ProfileIncomplete);
        }
        let job = self.catalog.get_job(company_id, job_id)?;

        let application = Application {
            id: applicant_id.clone(),
            job_id: job.id,
            company_id: job.company_id,
            status: ApplicationStatus::Pending,
            snapshot,
            applied_at: Utc::now(),
        };

        match self.applications.insert(application) {
            Ok(stored) => {
                info!(job_id = %job_id, applicant_id = %applicant_id, "application created");
                Ok(ApplyOutcome::Created(stored))
            }
            Err(RepositoryError::Conflict) => {
                let existing = self
                    .applications
                    .fetch(job_id, applicant_id)?
                    .ok_or(TrackerError::NotFound)?;
                info!(job_id = %job_id, applicant_id = %applicant_id, "already applied");
                Ok(ApplyOutcome::AlreadyApplied(existing))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Resolve the applicant's profile through the directory, then apply with it.
    pub fn apply_with_profile(
        &self,
        company_id: &AccountId,
        job_id: &JobId,
        applicant_id: &AccountId,
    ) -> Result<ApplyOutcome, TrackerError> {
        let profile = match self.directory.applicant(applicant_id) {
            Ok(profile) => profile,
            Err(DirectoryError::NotFound) => return Err(TrackerError::ProfileIncomplete),
            Err(other) => return Err(other.into()),
        };
        self.apply(
            company_id,
            job_id,
            applicant_id,
            ApplicantSnapshot::from(&profile),
        )
    }

    pub fn list_for_job(
        &self,
        company_id: &AccountId,
        job_id: &JobId,
    ) -> Result<Vec<Application>, TrackerError> {
        self.catalog.get_job(company_id, job_id)?;
        let mut applications = self.applications.for_job(job_id)?;
        applications.sort_by(|a, b| a.applied_at.cmp(&b.applied_at).then_with(|| a.id.cmp(&b.id)));
        Ok(applications)
    }

    pub fn list_for_applicant(
        &self,
        applicant_id: &AccountId,
    ) -> Result<Vec<Application>, TrackerError> {
        Ok(self.applications.for_applicant(applicant_id)?)
    }

    pub fn get_application(
        &self,
        job_id: &JobId,
        applicant_id: &AccountId,
    ) -> Result<Application, TrackerError> {
        self.applications
            .fetch(job_id, applicant_id)?
            .ok_or(TrackerError::NotFound)
    }

    /// Move an application to a new status on behalf of the owning company.
    pub fn update_status(
        &self,
        company_id: &AccountId,
        job_id: &JobId,
        application_id: &AccountId,
        status: ApplicationStatus,
    ) -> Result<Application, TrackerError> {
        self.catalog.get_job(company_id, job_id)?;
        let mut application = self.get_application(job_id, application_id)?;

        if !self.policy.allows(application.status, status) {
            warn!(
                job_id = %job_id,
                application_id = %application_id,
                from = application.status.label(),
                to = status.label(),
                "rejected status transition"
            );
            return Err(TrackerError::InvalidTransition {
                from: application.status,
                to: status,
            });
        }
        if application.status == status {
            return Ok(application);
        }

        application.status = status;
        self.applications.update(application.clone())?;
        info!(
            job_id = %job_id,
            application_id = %application_id,
            status = status.label(),
            "application status updated"
        );
        Ok(application)
    }
}

/// Error raised by the application tracker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("application not found")]
    NotFound,
    #[error("applicant profile is incomplete")]
    ProfileIncomplete,
    #[error("cannot move application from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("application store unavailable: {0}")]
    Unavailable(String),
}

impl TrackerError {
    pub fn is_retryable(&self) -> bool {
        match self {
            TrackerError::Unavailable(_) => true,
            TrackerError::Catalog(error) => error.is_retryable(),
            TrackerError::Directory(error) => error.is_retryable(),
            _ => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            TrackerError::NotFound => "Application not found.".to_string(),
            TrackerError::ProfileIncomplete => {
                "Could not fetch your profile. Please complete your profile first.".to_string()
            }
            TrackerError::InvalidTransition { .. } => self.to_string(),
            TrackerError::Catalog(error) => error.user_message(),
            TrackerError::Directory(error) => error.user_message(),
            TrackerError::Unavailable(_) => "Failed to apply. Please try again.".to_string(),
        }
    }
}

impl From<RepositoryError> for TrackerError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => TrackerError::NotFound,
            // Keyed creates resolve conflicts themselves; anything else is a store fault.
            RepositoryError::Conflict => {
                TrackerError::Unavailable("unexpected write conflict".to_string())
            }
            RepositoryError::Unavailable(reason) => TrackerError::Unavailable(reason),
        }
    }
}
