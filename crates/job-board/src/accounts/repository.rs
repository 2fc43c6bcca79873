use super::domain::{Account, AccountId, CompanyProfile};
use crate::store::RepositoryError;

/// Storage abstraction for account profiles of both kinds.
pub trait AccountRepository: Send + Sync {
    /// Keyed create; fails with `Conflict` when the id exists under any kind.
    fn insert(&self, account: Account) -> Result<Account, RepositoryError>;
    fn update(&self, account: Account) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError>;
    fn companies(&self) -> Result<Vec<CompanyProfile>, RepositoryError>;
}
