//! Account directory: identity classification and per-kind profiles.

pub mod credentials;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use credentials::{CredentialError, CredentialVerifier};
pub use domain::{
    Account, AccountId, AccountKind, ApplicantProfile, Classification, CompanyProfile,
};
pub use repository::AccountRepository;
pub use router::account_router;
pub use service::{AccountDirectory, AuthError, Authenticator, DirectoryError, Session};
pub use validation::{
    ApplicantSignUp, CompanySignUp, SignInRequest, ValidationError, MIN_PASSWORD_LENGTH,
};
