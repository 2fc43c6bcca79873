//! Form checks performed before the credential collaborator is contacted.

use serde::Deserialize;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email and Password cannot be empty")]
    MissingCredentials,
    #[error("Please fill in all required fields.")]
    MissingRequiredFields,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanySignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub linkedin: String,
}

impl CompanySignUp {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(&[&self.name, &self.email, &self.password])?;
        check_password(&self.password, &self.confirm_password)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicantSignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub cv_link: String,
}

impl ApplicantSignUp {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(&[&self.name, &self.email, &self.password])?;
        check_password(&self.password, &self.confirm_password)
    }
}

fn check_required(fields: &[&String]) -> Result<(), ValidationError> {
    if fields.iter().any(|value| value.trim().is_empty()) {
        return Err(ValidationError::MissingRequiredFields);
    }
    Ok(())
}

// Mismatch is reported before length, matching the order users see on the form.
fn check_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}
