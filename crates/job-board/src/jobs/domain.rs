use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::AccountId;

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Intern,
    Remote,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Intern,
        JobType::Remote,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "Full Time",
            JobType::PartTime => "Part Time",
            JobType::Intern => "Intern",
            JobType::Remote => "Remote",
        }
    }

    /// Accepts display labels ("Full Time") as well as snake-case keys ("full_time").
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "fulltime" => Some(JobType::FullTime),
            "parttime" => Some(JobType::PartTime),
            "intern" | "internship" => Some(JobType::Intern),
            "remote" => Some(JobType::Remote),
            _ => None,
        }
    }
}

/// Caller-supplied posting content; everything a company fills in on the job form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsibilities: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub job_type: JobType,
}

/// Stored posting. `company_id` is persisted on the record rather than implied by the
/// storage path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub company_id: AccountId,
    #[serde(flatten)]
    pub details: JobDetails,
    pub posted_at: DateTime<Utc>,
}

impl Job {
    pub fn is_listable(&self) -> bool {
        !self.details.title.trim().is_empty()
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }
}
