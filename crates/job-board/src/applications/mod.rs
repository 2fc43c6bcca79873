//! Application tracker: one application per applicant per job, plus status review.

pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantSnapshot, Application, ApplicationStatus, ApplyOutcome, TransitionPolicy,
};
pub use export::{write_csv, ExportError};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationTracker, TrackerError};
