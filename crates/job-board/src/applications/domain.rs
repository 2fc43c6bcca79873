use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::{AccountId, ApplicantProfile};
use crate::jobs::JobId;

/// Status tracked for each application. `Pending` is the only initial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Reviewed => "Reviewed",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ApplicationStatus::Pending),
            "reviewed" => Some(ApplicationStatus::Reviewed),
            "accepted" => Some(ApplicationStatus::Accepted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }
}

/// Which status changes a deployment accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Pending -> {Reviewed, Accepted, Rejected}; Reviewed -> {Accepted, Rejected}.
    #[default]
    Strict,
    /// Any status may follow any other.
    Permissive,
}

impl TransitionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(TransitionPolicy::Strict),
            "permissive" => Some(TransitionPolicy::Permissive),
            _ => None,
        }
    }

    pub fn allows(self, from: ApplicationStatus, to: ApplicationStatus) -> bool {
        use ApplicationStatus::*;

        if from == to {
            return true;
        }
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => matches!(
                (from, to),
                (Pending, Reviewed | Accepted | Rejected) | (Reviewed, Accepted | Rejected)
            ),
        }
    }
}

/// Applicant fields captured when the application is created. Never rewritten afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSnapshot {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cv_link: String,
    #[serde(default)]
    pub linkedin: String,
}

impl ApplicantSnapshot {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

impl From<&ApplicantProfile> for ApplicantSnapshot {
    fn from(profile: &ApplicantProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            cv_link: profile.cv_link.clone(),
            linkedin: profile.linkedin.clone(),
        }
    }
}

/// Application record keyed by the applicant's id within the job's scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: AccountId,
    pub job_id: JobId,
    pub company_id: AccountId,
    pub status: ApplicationStatus,
    pub snapshot: ApplicantSnapshot,
    pub applied_at: DateTime<Utc>,
}

/// Result of an apply call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Created(Application),
    /// The stored record from the first call; its snapshot is unchanged.
    AlreadyApplied(Application),
}

impl ApplyOutcome {
    pub fn application(&self) -> &Application {
        match self {
            ApplyOutcome::Created(application) | ApplyOutcome::AlreadyApplied(application) => {
                application
            }
        }
    }

    pub fn into_application(self) -> Application {
        match self {
            ApplyOutcome::Created(application) | ApplyOutcome::AlreadyApplied(application) => {
                application
            }
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ApplyOutcome::Created(_))
    }
}
