use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use super::cache::{SavedJobsBook, SavedJobsCache, SavedJobsError};
use super::store::SavedJobStore;
use crate::accounts::router::directory_error_response;
use crate::accounts::{AccountId, AccountRepository};
use crate::error::error_response;
use crate::jobs::router::catalog_error_response;
use crate::jobs::{JobId, JobRepository};

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub job_id: String,
}

/// Router exposing each applicant's bookmark set.
pub fn saved_jobs_router<S, J, R>(book: Arc<SavedJobsBook<S, J, R>>) -> Router
where
    S: SavedJobStore + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/applicants/:applicant_id/saved-jobs",
            get(list_handler::<S, J, R>).post(save_handler::<S, J, R>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/saved-jobs/:job_id",
            delete(remove_handler::<S, J, R>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/saved-jobs/:job_id/toggle",
            post(toggle_handler::<S, J, R>),
        )
        .with_state(book)
}

type SharedCache<S, J, R> = Arc<SavedJobsCache<S, J, R>>;

fn open_cache<S, J, R>(
    book: &SavedJobsBook<S, J, R>,
    applicant_id: String,
) -> Result<SharedCache<S, J, R>, Response>
where
    S: SavedJobStore + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    book.for_applicant(&AccountId(applicant_id))
        .map_err(saved_error_response)
}

pub(crate) async fn list_handler<S, J, R>(
    State(book): State<Arc<SavedJobsBook<S, J, R>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    S: SavedJobStore + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    match open_cache(&book, applicant_id) {
        Ok(cache) => (StatusCode::OK, Json(cache.snapshot())).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn save_handler<S, J, R>(
    State(book): State<Arc<SavedJobsBook<S, J, R>>>,
    Path(applicant_id): Path<String>,
    Json(request): Json<SaveRequest>,
) -> Response
where
    S: SavedJobStore + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    let cache = match open_cache(&book, applicant_id) {
        Ok(cache) => cache,
        Err(response) => return response,
    };

    match cache.save(&JobId(request.job_id)) {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(error) => saved_error_response(error),
    }
}

pub(crate) async fn remove_handler<S, J, R>(
    State(book): State<Arc<SavedJobsBook<S, J, R>>>,
    Path((applicant_id, job_id)): Path<(String, String)>,
) -> Response
where
    S: SavedJobStore + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    let cache = match open_cache(&book, applicant_id) {
        Ok(cache) => cache,
        Err(response) => return response,
    };

    let job_id = JobId(job_id);
    let Some(saved) = cache
        .snapshot()
        .into_iter()
        .find(|entry| entry.id == job_id)
    else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match cache.remove(&saved) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => saved_error_response(error),
    }
}

pub(crate) async fn toggle_handler<S, J, R>(
    State(book): State<Arc<SavedJobsBook<S, J, R>>>,
    Path((applicant_id, job_id)): Path<(String, String)>,
) -> Response
where
    S: SavedJobStore + 'static,
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    let cache = match open_cache(&book, applicant_id) {
        Ok(cache) => cache,
        Err(response) => return response,
    };

    match cache.toggle(&JobId(job_id)) {
        Ok(change) => (StatusCode::OK, Json(change)).into_response(),
        Err(error) => saved_error_response(error),
    }
}

pub(crate) fn saved_error_response(error: SavedJobsError) -> Response {
    let status = match &error {
        SavedJobsError::JobNotFound(_) | SavedJobsError::UnknownApplicant(_) => {
            StatusCode::NOT_FOUND
        }
        SavedJobsError::Catalog(inner) => return catalog_error_response(inner.clone()),
        SavedJobsError::Directory(inner) => return directory_error_response(inner.clone()),
        SavedJobsError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    error_response(status, error.user_message())
}
