use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::credentials::{CredentialError, CredentialVerifier};
use super::domain::{AccountId, AccountKind, Classification};
use super::repository::AccountRepository;
use super::service::{AuthError, Authenticator, DirectoryError};
use super::validation::{ApplicantSignUp, CompanySignUp, SignInRequest};
use crate::error::error_response;

/// Router exposing sign-in, sign-up, and account lookup.
pub fn account_router<R, C>(auth: Arc<Authenticator<R, C>>) -> Router
where
    R: AccountRepository + 'static,
    C: CredentialVerifier + 'static,
{
    Router::new()
        .route("/api/v1/auth/sign-in", post(sign_in_handler::<R, C>))
        .route(
            "/api/v1/auth/sign-up/company",
            post(company_sign_up_handler::<R, C>),
        )
        .route(
            "/api/v1/auth/sign-up/applicant",
            post(applicant_sign_up_handler::<R, C>),
        )
        .route("/api/v1/accounts/:account_id", get(account_handler::<R, C>))
        .with_state(auth)
}

pub(crate) async fn sign_in_handler<R, C>(
    State(auth): State<Arc<Authenticator<R, C>>>,
    Json(request): Json<SignInRequest>,
) -> Response
where
    R: AccountRepository + 'static,
    C: CredentialVerifier + 'static,
{
    match auth.sign_in(&request) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(error) => auth_error_response(error),
    }
}

pub(crate) async fn company_sign_up_handler<R, C>(
    State(auth): State<Arc<Authenticator<R, C>>>,
    Json(form): Json<CompanySignUp>,
) -> Response
where
    R: AccountRepository + 'static,
    C: CredentialVerifier + 'static,
{
    match auth.sign_up_company(form) {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(error) => auth_error_response(error),
    }
}

pub(crate) async fn applicant_sign_up_handler<R, C>(
    State(auth): State<Arc<Authenticator<R, C>>>,
    Json(form): Json<ApplicantSignUp>,
) -> Response
where
    R: AccountRepository + 'static,
    C: CredentialVerifier + 'static,
{
    match auth.sign_up_applicant(form) {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(error) => auth_error_response(error),
    }
}

pub(crate) async fn account_handler<R, C>(
    State(auth): State<Arc<Authenticator<R, C>>>,
    Path(account_id): Path<String>,
) -> Response
where
    R: AccountRepository + 'static,
    C: CredentialVerifier + 'static,
{
    let id = AccountId(account_id);
    let directory = auth.directory();
    let classification = match directory.classify(&id) {
        Ok(classification) => classification,
        Err(error) => return directory_error_response(error),
    };

    let kind = match classification {
        Classification::Company => AccountKind::Company,
        Classification::Applicant => AccountKind::Applicant,
        Classification::Unknown => {
            let payload = json!({
                "account_id": id,
                "classification": classification,
            });
            return (StatusCode::NOT_FOUND, Json(payload)).into_response();
        }
    };

    match directory.get_profile(kind, &id) {
        Ok(profile) => {
            let payload = json!({
                "account_id": id,
                "classification": classification,
                "profile": profile,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => directory_error_response(error),
    }
}

pub(crate) fn auth_error_response(error: AuthError) -> Response {
    let status = match &error {
        AuthError::Validation(_) => StatusCode::BAD_REQUEST,
        AuthError::Credential(CredentialError::EmailInUse) => StatusCode::CONFLICT,
        AuthError::Credential(CredentialError::Other(_)) => StatusCode::BAD_GATEWAY,
        AuthError::Credential(_) => StatusCode::UNAUTHORIZED,
        AuthError::ProfileNotFound => StatusCode::NOT_FOUND,
        AuthError::Directory(inner) => return directory_error_response(inner.clone()),
    };
    error_response(status, error.user_message())
}

pub(crate) fn directory_error_response(error: DirectoryError) -> Response {
    let status = match &error {
        DirectoryError::NotFound => StatusCode::NOT_FOUND,
        DirectoryError::Conflict => StatusCode::CONFLICT,
        DirectoryError::PermissionDenied => StatusCode::FORBIDDEN,
        DirectoryError::MissingId => StatusCode::BAD_REQUEST,
        DirectoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    error_response(status, error.user_message())
}
