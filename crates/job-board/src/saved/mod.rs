//! Saved jobs: per-applicant bookmark sets persisted locally and observable.

pub mod cache;
pub mod domain;
pub mod router;
pub mod store;


pub use cache::{SavedJobsBook, SavedJobsCache, SavedJobsError, SavedJobsFeed};
pub use domain::{SavedJob, SavedJobChange};
pub use router::saved_jobs_router;
pub use store::{JsonFileSavedJobStore, MemorySavedJobStore, SavedJobStore};
