//! Job catalog: postings owned by companies, listed across the board.

pub mod domain;
pub mod listing;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{Job, JobDetails, JobId, JobType};
pub use listing::{enrich, filter_by_type, JobListing, UNKNOWN_COMPANY};
pub use repository::JobRepository;
pub use router::{job_router, JobRoutes};
pub use service::{CatalogError, JobCatalog};
