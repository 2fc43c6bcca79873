use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{JobDetails, JobId, JobType};
use super::listing::{enrich, filter_by_type, UNKNOWN_COMPANY};
use super::repository::JobRepository;
use super::service::{CatalogError, JobCatalog};
use crate::accounts::router::directory_error_response;
use crate::accounts::{AccountDirectory, AccountId, AccountKind, AccountRepository};
use crate::error::error_response;

/// Shared handles for the job endpoints; listings join against the directory.
pub struct JobRoutes<J, R> {
    pub catalog: Arc<JobCatalog<J>>,
    pub directory: Arc<AccountDirectory<R>>,
}

impl<J, R> Clone for JobRoutes<J, R> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            directory: Arc::clone(&self.directory),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub job_type: Option<String>,
}

pub fn job_router<J, R>(routes: JobRoutes<J, R>) -> Router
where
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    Router::new()
        .route("/api/v1/jobs", get(listings_handler::<J, R>))
        .route(
            "/api/v1/companies/:company_id/jobs",
            get(company_jobs_handler::<J, R>).post(create_job_handler::<J, R>),
        )
        .route(
            "/api/v1/companies/:company_id/jobs/:job_id",
            get(job_detail_handler::<J, R>).delete(delete_job_handler::<J, R>),
        )
        .with_state(routes)
}

pub(crate) async fn listings_handler<J, R>(
    State(routes): State<JobRoutes<J, R>>,
    Query(query): Query<ListingQuery>,
) -> Response
where
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    let job_type = match query.job_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) if raw.eq_ignore_ascii_case("all") => None,
        Some(raw) => match JobType::parse(raw) {
            Some(job_type) => Some(job_type),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("unknown job type '{raw}'"),
                )
            }
        },
    };

    let jobs = match routes.catalog.list_all_jobs() {
        Ok(jobs) => jobs,
        Err(error) => return catalog_error_response(error),
    };
    let companies = match routes.directory.list_companies() {
        Ok(companies) => companies,
        Err(error) => return directory_error_response(error),
    };

    let listings = enrich(filter_by_type(jobs, job_type), &companies);
    (StatusCode::OK, Json(listings)).into_response()
}

pub(crate) async fn company_jobs_handler<J, R>(
    State(routes): State<JobRoutes<J, R>>,
    Path(company_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    match routes.catalog.list_jobs(&AccountId(company_id)) {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn create_job_handler<J, R>(
    State(routes): State<JobRoutes<J, R>>,
    Path(company_id): Path<String>,
    Json(details): Json<JobDetails>,
) -> Response
where
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    let company_id = AccountId(company_id);
    if let Err(error) = routes
        .directory
        .get_profile(AccountKind::Company, &company_id)
    {
        return directory_error_response(error);
    }

    match routes.catalog.create_job(&company_id, details) {
        Ok(job_id) => (StatusCode::CREATED, Json(json!({ "job_id": job_id }))).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn job_detail_handler<J, R>(
    State(routes): State<JobRoutes<J, R>>,
    Path((company_id, job_id)): Path<(String, String)>,
) -> Response
where
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    let company_id = AccountId(company_id);
    let job = match routes.catalog.get_job(&company_id, &JobId(job_id)) {
        Ok(job) => job,
        Err(error) => return catalog_error_response(error),
    };

    // A missing company profile only degrades the display name.
    let company_name = routes
        .directory
        .get_profile(AccountKind::Company, &company_id)
        .map(|account| account.name().to_string())
        .unwrap_or_else(|_| UNKNOWN_COMPANY.to_string());

    let payload = json!({
        "job": job,
        "company": company_name,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn delete_job_handler<J, R>(
    State(routes): State<JobRoutes<J, R>>,
    Path((company_id, job_id)): Path<(String, String)>,
) -> Response
where
    J: JobRepository + 'static,
    R: AccountRepository + 'static,
{
    match routes
        .catalog
        .delete_job(&AccountId(company_id), &JobId(job_id))
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) fn catalog_error_response(error: CatalogError) -> Response {
    let status = match &error {
        CatalogError::NotFound => StatusCode::NOT_FOUND,
        CatalogError::PermissionDenied => StatusCode::FORBIDDEN,
        CatalogError::MissingCompany => StatusCode::BAD_REQUEST,
        CatalogError::Conflict => StatusCode::CONFLICT,
        CatalogError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    error_response(status, error.user_message())
}
