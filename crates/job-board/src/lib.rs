//! Data service for a job board: account classification, job postings, applications,
//! and a locally persisted saved-jobs set.

pub mod accounts;
pub mod applications;
pub mod config;
pub mod error;
pub mod jobs;
pub mod saved;
pub mod store;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;
