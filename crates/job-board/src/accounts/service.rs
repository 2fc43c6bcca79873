use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::credentials::{CredentialError, CredentialVerifier};
use super::domain::{
    Account, AccountId, AccountKind, ApplicantProfile, Classification, CompanyProfile,
};
use super::repository::AccountRepository;
use super::validation::{ApplicantSignUp, CompanySignUp, SignInRequest, ValidationError};
use crate::store::RepositoryError;

/// Resolves identities to account kinds and owns the profile records.
pub struct AccountDirectory<R> {
    accounts: Arc<R>,
}

impl<R> AccountDirectory<R>
where
    R: AccountRepository + 'static,
{
    pub fn new(accounts: Arc<R>) -> Self {
        Self { accounts }
    }

    /// Classify an identity by its stored discriminator.
    pub fn classify(&self, id: &AccountId) -> Result<Classification, DirectoryError> {
        let account = self.accounts.fetch(id)?;
        let classification = Classification::from(account.map(|account| account.kind()));
        debug!(account_id = %id, ?classification, "classified identity");
        Ok(classification)
    }

    /// Fetch a profile of the requested kind; a record of the other kind is not a match.
    pub fn get_profile(&self, kind: AccountKind, id: &AccountId) -> Result<Account, DirectoryError> {
        match self.accounts.fetch(id)? {
            Some(account) if account.kind() == kind => Ok(account),
            _ => Err(DirectoryError::NotFound),
        }
    }

    pub fn applicant(&self, id: &AccountId) -> Result<ApplicantProfile, DirectoryError> {
        self.get_profile(AccountKind::Applicant, id)?
            .into_applicant()
            .ok_or(DirectoryError::NotFound)
    }

    pub fn create_profile(&self, account: Account) -> Result<Account, DirectoryError> {
        if account.id().is_blank() {
            return Err(DirectoryError::MissingId);
        }
        let stored = self.accounts.insert(account)?;
        info!(account_id = %stored.id(), kind = stored.kind().label(), "profile created");
        Ok(stored)
    }

    /// Replace a profile. The kind recorded at sign-up is permanent.
    pub fn update_profile(&self, account: Account) -> Result<Account, DirectoryError> {
        let existing = self
            .accounts
            .fetch(account.id())?
            .ok_or(DirectoryError::NotFound)?;
        if existing.kind() != account.kind() {
            return Err(DirectoryError::PermissionDenied);
        }
        self.accounts.update(account.clone())?;
        Ok(account)
    }

    pub fn list_companies(&self) -> Result<Vec<CompanyProfile>, DirectoryError> {
        Ok(self.accounts.companies()?)
    }
}

/// Error raised by the account directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("account not found")]
    NotFound,
    #[error("an account with this id already exists")]
    Conflict,
    #[error("account kind cannot be changed")]
    PermissionDenied,
    #[error("account id is required")]
    MissingId,
    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

impl DirectoryError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, DirectoryError::Unavailable(_))
    }

    pub fn user_message(&self) -> String {
        match self {
            DirectoryError::NotFound => "User profile not found.".to_string(),
            DirectoryError::Conflict => "This account already has a profile.".to_string(),
            DirectoryError::PermissionDenied => "You cannot change your account type.".to_string(),
            DirectoryError::MissingId => "Account id is required.".to_string(),
            DirectoryError::Unavailable(_) => {
                "Service is unavailable. Please try again.".to_string()
            }
        }
    }
}

impl From<RepositoryError> for DirectoryError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict => DirectoryError::Conflict,
            RepositoryError::NotFound => DirectoryError::NotFound,
            RepositoryError::Unavailable(reason) => DirectoryError::Unavailable(reason),
        }
    }
}

/// Authenticated identity paired with its resolved account kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub account_id: AccountId,
    pub kind: AccountKind,
}

/// Sign-in and sign-up flows layered over the credential collaborator and the directory.
pub struct Authenticator<R, C> {
    directory: Arc<AccountDirectory<R>>,
    credentials: Arc<C>,
}

impl<R, C> Authenticator<R, C>
where
    R: AccountRepository + 'static,
    C: CredentialVerifier + 'static,
{
    pub fn new(directory: Arc<AccountDirectory<R>>, credentials: Arc<C>) -> Self {
        Self {
            directory,
            credentials,
        }
    }

    pub fn directory(&self) -> &Arc<AccountDirectory<R>> {
        &self.directory
    }

    pub fn sign_in(&self, request: &SignInRequest) -> Result<Session, AuthError> {
        request.validate()?;
        let account_id = self
            .credentials
            .verify(request.email.trim(), &request.password)?;

        let kind = match self.directory.classify(&account_id)? {
            Classification::Company => AccountKind::Company,
            Classification::Applicant => AccountKind::Applicant,
            Classification::Unknown => {
                warn!(account_id = %account_id, "verified identity has no profile");
                return Err(AuthError::ProfileNotFound);
            }
        };

        info!(account_id = %account_id, kind = kind.label(), "signed in");
        Ok(Session { account_id, kind })
    }

    pub fn sign_up_company(&self, form: CompanySignUp) -> Result<Session, AuthError> {
        form.validate()?;
        let account_id = self
            .credentials
            .register(form.email.trim(), &form.password)
            .map_err(sign_up_error)?;
        let account = Account::Company(CompanyProfile {
            id: account_id.clone(),
            name: form.name.trim().to_string(),
            website: form.website,
            phone: form.phone,
            industry: form.industry,
            linkedin: form.linkedin,
        });
        self.provision(account)?;
        Ok(Session {
            account_id,
            kind: AccountKind::Company,
        })
    }

    pub fn sign_up_applicant(&self, form: ApplicantSignUp) -> Result<Session, AuthError> {
        form.validate()?;
        let email = form.email.trim().to_string();
        let account_id = self
            .credentials
            .register(&email, &form.password)
            .map_err(sign_up_error)?;
        let account = Account::Applicant(ApplicantProfile {
            id: account_id.clone(),
            name: form.name.trim().to_string(),
            email,
            phone: form.phone,
            linkedin: form.linkedin,
            cv_link: form.cv_link,
        });
        self.provision(account)?;
        Ok(Session {
            account_id,
            kind: AccountKind::Applicant,
        })
    }

    /// Create the profile for a fresh registration, releasing the credentials if that fails
    /// so the email can sign up again.
    fn provision(&self, account: Account) -> Result<(), AuthError> {
        let account_id = account.id().clone();
        let error = match self.directory.create_profile(account) {
            Ok(_) => return Ok(()),
            Err(error) => error,
        };
        warn!(account_id = %account_id, %error, "profile creation failed after registration");
        if let Err(rollback) = self.credentials.unregister(&account_id) {
            warn!(account_id = %account_id, error = %rollback, "failed to release credentials");
        }
        Err(error.into())
    }
}

const SIGN_UP_FAILED: &str = "Sign up failed. Please try again.";

fn sign_up_error(error: CredentialError) -> AuthError {
    match error {
        CredentialError::Other(message) if message.trim().is_empty() => {
            AuthError::Credential(CredentialError::Other(SIGN_UP_FAILED.to_string()))
        }
        other => AuthError::Credential(other),
    }
}

/// Error raised by sign-in and sign-up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error("verified identity has no profile")]
    ProfileNotFound,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Validation(error) => error.to_string(),
            AuthError::Credential(CredentialError::NoSuchUser) => {
                "No account found with this email.".to_string()
            }
            AuthError::Credential(CredentialError::InvalidCredential) => {
                "Incorrect password.".to_string()
            }
            AuthError::Credential(CredentialError::EmailInUse) => {
                "An account with this email already exists.".to_string()
            }
            AuthError::Credential(CredentialError::Other(message)) if !message.is_empty() => {
                message.clone()
            }
            AuthError::Credential(CredentialError::Other(_)) => {
                "Authentication failed.".to_string()
            }
            AuthError::ProfileNotFound => "User profile not found.".to_string(),
            AuthError::Directory(error) => error.user_message(),
        }
    }
}
