use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationStatus, ApplyOutcome};
use super::repository::ApplicationRepository;
use super::service::{ApplicationTracker, TrackerError};
use crate::accounts::router::directory_error_response;
use crate::accounts::{AccountId, AccountRepository};
use crate::error::error_response;
use crate::jobs::router::catalog_error_response;
use crate::jobs::{JobId, JobRepository};

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub applicant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Router exposing application intake and status management.
pub fn application_router<A, J, R>(tracker: Arc<ApplicationTracker<A, J, R>>) -> Router
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/companies/:company_id/jobs/:job_id/applications",
            get(list_handler::<A, J, R>).post(apply_handler::<A, J, R>),
        )
        .route(
            "/api/v1/companies/:company_id/jobs/:job_id/applications/:application_id/status",
            put(status_handler::<A, J, R>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/applications",
            get(applicant_handler::<A, J, R>),
        )
        .with_state(tracker)
}

pub(crate) async fn apply_handler<A, J, R>(
    State(tracker): State<Arc<ApplicationTracker<A, J, R>>>,
    Path((company_id, job_id)): Path<(String, String)>,
    Json(request): Json<ApplyRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    let result = tracker.apply_with_profile(
        &AccountId(company_id),
        &JobId(job_id),
        &AccountId(request.applicant_id),
    );

    match result {
        Ok(ApplyOutcome::Created(application)) => {
            let payload = json!({ "application": application, "already_applied": false });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Ok(ApplyOutcome::AlreadyApplied(application)) => {
            let payload = json!({ "application": application, "already_applied": true });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => tracker_error_response(error),
    }
}

pub(crate) async fn list_handler<A, J, R>(
    State(tracker): State<Arc<ApplicationTracker<A, J, R>>>,
    Path((company_id, job_id)): Path<(String, String)>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    match tracker.list_for_job(&AccountId(company_id), &JobId(job_id)) {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(error) => tracker_error_response(error),
    }
}

pub(crate) async fn status_handler<A, J, R>(
    State(tracker): State<Arc<ApplicationTracker<A, J, R>>>,
    Path((company_id, job_id, application_id)): Path<(String, String, String)>,
    Json(request): Json<StatusUpdateRequest>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    let Some(status) = ApplicationStatus::parse(&request.status) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("unknown application status '{}'", request.status),
        );
    };

    match tracker.update_status(
        &AccountId(company_id),
        &JobId(job_id),
        &AccountId(application_id),
        status,
    ) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(error) => tracker_error_response(error),
    }
}

pub(crate) async fn applicant_handler<A, J, R>(
    State(tracker): State<Arc<ApplicationTracker<A, J, R>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    match tracker.list_for_applicant(&AccountId(applicant_id)) {
        Ok(applications) => (StatusCode::OK, Json(applications)).into_response(),
        Err(error) => tracker_error_response(error),
    }
}

pub(crate) fn tracker_error_response(error: TrackerError) -> Response {
    let status = match &error {
        TrackerError::NotFound => StatusCode::NOT_FOUND,
        TrackerError::ProfileIncomplete => StatusCode::UNPROCESSABLE_ENTITY,
        TrackerError::InvalidTransition { .. } => StatusCode::CONFLICT,
        TrackerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        TrackerError::Catalog(inner) => return catalog_error_response(inner.clone()),
        TrackerError::Directory(inner) => return directory_error_response(inner.clone()),
    };
    error_response(status, error.user_message())
}
