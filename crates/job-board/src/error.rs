use crate::accounts::router::{auth_error_response, directory_error_response};
use crate::accounts::{AuthError, DirectoryError};
use crate::applications::router::tracker_error_response;
use crate::applications::{ExportError, TrackerError};
use crate::config::ConfigError;
use crate::jobs::router::catalog_error_response;
use crate::jobs::CatalogError;
use crate::saved::router::saved_error_response;
use crate::saved::SavedJobsError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Auth(AuthError),
    Directory(DirectoryError),
    Catalog(CatalogError),
    Tracker(TrackerError),
    SavedJobs(SavedJobsError),
    Export(ExportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Auth(err) => write!(f, "authentication error: {}", err),
            AppError::Directory(err) => write!(f, "account error: {}", err),
            AppError::Catalog(err) => write!(f, "job catalog error: {}", err),
            AppError::Tracker(err) => write!(f, "application error: {}", err),
            AppError::SavedJobs(err) => write!(f, "saved jobs error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Auth(err) => Some(err),
            AppError::Directory(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Tracker(err) => Some(err),
            AppError::SavedJobs(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

/// Domain errors answer with the same status and message as their routers.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(err) => auth_error_response(err),
            AppError::Directory(err) => directory_error_response(err),
            AppError::Catalog(err) => catalog_error_response(err),
            AppError::Tracker(err) => tracker_error_response(err),
            AppError::SavedJobs(err) => saved_error_response(err),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Export(_) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        }
    }
}

/// JSON error body shared by every router.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(json!({ "error": message.into() }));
    (status, body).into_response()
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<DirectoryError> for AppError {
    fn from(value: DirectoryError) -> Self {
        Self::Directory(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<TrackerError> for AppError {
    fn from(value: TrackerError) -> Self {
        Self::Tracker(value)
    }
}

impl From<SavedJobsError> for AppError {
    fn from(value: SavedJobsError) -> Self {
        Self::SavedJobs(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::CredentialError;
    use crate::applications::ApplicationStatus;
    use crate::jobs::JobId;

    fn status_of(error: impl Into<AppError>) -> StatusCode {
        error.into().into_response().status()
    }

    #[test]
    fn domain_errors_use_router_statuses() {
        assert_eq!(status_of(DirectoryError::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_of(DirectoryError::PermissionDenied), StatusCode::FORBIDDEN);
        assert_eq!(status_of(CatalogError::PermissionDenied), StatusCode::FORBIDDEN);
        assert_eq!(status_of(CatalogError::MissingCompany), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AuthError::Credential(CredentialError::EmailInUse)),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(TrackerError::ProfileIncomplete), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            status_of(TrackerError::InvalidTransition {
                from: ApplicationStatus::Accepted,
                to: ApplicationStatus::Pending,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SavedJobsError::JobNotFound(JobId::new("job-1"))),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn domain_errors_keep_user_facing_messages() {
        let response = AppError::from(CatalogError::PermissionDenied).into_response();
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(body["error"], json!(CatalogError::PermissionDenied.user_message()));
    }

    #[test]
    fn infrastructure_errors_are_internal() {
        let io = std::io::Error::other("disk full");
        assert_eq!(status_of(io), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
