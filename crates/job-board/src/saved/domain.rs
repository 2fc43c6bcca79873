use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::AccountId;
use crate::jobs::{Job, JobId};

/// Locally cached bookmark with enough fields to render without the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: JobId,
    pub title: String,
    pub company_id: AccountId,
    /// Company display name at the time the job was saved.
    #[serde(default)]
    pub company: String,
    pub location: String,
    pub salary: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedJob {
    pub fn from_job(job: &Job, company: impl Into<String>, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: job.id.clone(),
            title: job.details.title.clone(),
            company_id: job.company_id.clone(),
            company: company.into(),
            location: job.details.location.clone(),
            salary: job.details.salary.clone(),
            saved_at,
        }
    }
}

/// Outcome of a mutation through the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum SavedJobChange {
    Saved { job: SavedJob },
    Removed { job_id: JobId },
}
