use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use job_board::accounts::account_router;
use job_board::applications::application_router;
use job_board::jobs::{job_router, JobRoutes};
use job_board::saved::saved_jobs_router;
use serde_json::json;

use crate::infra::{AppState, BoardServices};

pub(crate) fn with_board_routes(services: &BoardServices) -> Router {
    let jobs = JobRoutes {
        catalog: services.catalog.clone(),
        directory: services.directory.clone(),
    };

    account_router(services.auth.clone())
        .merge(job_router(jobs))
        .merge(application_router(services.tracker.clone()))
        .merge(saved_jobs_router(services.saved.clone()))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
