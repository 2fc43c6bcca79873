//! CSV export of a job's applicants for offline review.

use std::io::Write;

use serde::Serialize;

use super::domain::Application;

#[derive(Debug, Serialize)]
struct ApplicationRow<'a> {
    application_id: &'a str,
    job_id: &'a str,
    status: &'static str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    cv_link: &'a str,
    linkedin: &'a str,
    applied_at: String,
}

impl<'a> From<&'a Application> for ApplicationRow<'a> {
    fn from(application: &'a Application) -> Self {
        Self {
            application_id: application.id.as_str(),
            job_id: application.job_id.as_str(),
            status: application.status.label(),
            name: &application.snapshot.name,
            email: &application.snapshot.email,
            phone: &application.snapshot.phone,
            cv_link: &application.snapshot.cv_link,
            linkedin: &application.snapshot.linkedin,
            applied_at: application.applied_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Write one header row plus one row per application.
pub fn write_csv<W: Write>(applications: &[Application], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    if applications.is_empty() {
        csv.write_record([
            "application_id",
            "job_id",
            "status",
            "name",
            "email",
            "phone",
            "cv_link",
            "linkedin",
            "applied_at",
        ])?;
    }
    for application in applications {
        csv.serialize(ApplicationRow::from(application))?;
    }
    csv.flush()?;
    Ok(())
}
