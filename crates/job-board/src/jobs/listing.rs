//! Display join between postings and company names.

use std::collections::HashMap;

use serde::Serialize;

use super::domain::{Job, JobId, JobType};
use crate::accounts::{AccountId, CompanyProfile};

pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Posting enriched with its company's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobListing {
    pub id: JobId,
    pub company_id: AccountId,
    pub company: String,
    pub title: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub responsibilities: String,
    pub requirements: String,
    pub job_type: &'static str,
}

pub fn enrich(jobs: Vec<Job>, companies: &[CompanyProfile]) -> Vec<JobListing> {
    let names: HashMap<&AccountId, &str> = companies
        .iter()
        .map(|company| (&company.id, company.name.as_str()))
        .collect();

    jobs.into_iter()
        .map(|job| {
            let company = names
                .get(&job.company_id)
                .copied()
                .unwrap_or(UNKNOWN_COMPANY)
                .to_string();
            JobListing {
                id: job.id,
                company_id: job.company_id,
                company,
                job_type: job.details.job_type.label(),
                title: job.details.title,
                location: job.details.location,
                salary: job.details.salary,
                description: job.details.description,
                responsibilities: job.details.responsibilities,
                requirements: job.details.requirements,
            }
        })
        .collect()
}

/// Narrows listings to one job type; `None` keeps everything.
pub fn filter_by_type(jobs: Vec<Job>, job_type: Option<JobType>) -> Vec<Job> {
    match job_type {
        Some(wanted) => jobs
            .into_iter()
            .filter(|job| job.details.job_type == wanted)
            .collect(),
        None => jobs,
    }
}
