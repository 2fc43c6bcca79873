//! Storage primitives shared by the board components.
//!
//! Each component declares its own repository trait; this module holds the error every
//! backend reports and an in-memory document store implementing all of them.

mod memory;

pub use memory::{MemoryCredentials, MemoryDocumentStore};

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
