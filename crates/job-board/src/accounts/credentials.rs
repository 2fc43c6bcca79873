use super::domain::AccountId;

/// External credential provider. Its internals are opaque to the board; it only maps an
/// email/password pair to an identity token.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Result<AccountId, CredentialError>;
    fn register(&self, email: &str, password: &str) -> Result<AccountId, CredentialError>;
    /// Drop a registration whose profile could not be created.
    fn unregister(&self, id: &AccountId) -> Result<(), CredentialError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("no account found for this email")]
    NoSuchUser,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("email already registered")]
    EmailInUse,
    #[error("{0}")]
    Other(String),
}
