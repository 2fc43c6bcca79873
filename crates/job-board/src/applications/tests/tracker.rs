use std::sync::Arc;

use crate::accounts::{Account, AccountDirectory, AccountId, ApplicantProfile};
use crate::applications::{
    ApplicantSnapshot, ApplicationStatus, ApplicationTracker, ApplyOutcome, TrackerError,
};
use crate::jobs::{CatalogError, JobCatalog, JobId};
use crate::store::MemoryDocumentStore;
use crate::testing::*;

#[test]
fn company_reviews_an_application_end_to_end() {
    let board = board();
    let company = board.company("c1", "Acme");
    let job = board.job(&company, "Backend Engineer");
    let applicant = board.applicant("a1", "Ada");

    let outcome = board
        .tracker
        .apply_with_profile(&company, &job, &applicant)
        .expect("application created");
    assert!(outcome.is_created());

    let applications = board
        .tracker
        .list_for_job(&company, &job)
        .expect("listing");
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].id, AccountId::new("a1"));
    assert_eq!(applications[0].status, ApplicationStatus::Pending);
    assert_eq!(applications[0].company_id, company);

    board
        .tracker
        .update_status(
            &company,
            &job,
            &AccountId::new("a1"),
            ApplicationStatus::Accepted,
        )
        .expect("status updated");

    let applications = board
        .tracker
        .list_for_job(&company, &job)
        .expect("listing");
    assert_eq!(applications[0].status, ApplicationStatus::Accepted);
}

#[test]
fn second_apply_keeps_the_first_snapshot() {
    let board = board();
    let company = board.company("c1", "Acme");
    let job = board.job(&company, "Backend Engineer");
    let applicant = AccountId::new("a1");

    let first = board
        .tracker
        .apply(
            &company,
            &job,
            &applicant,
            ApplicantSnapshot {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: String::new(),
                cv_link: "v1.pdf".to_string(),
                linkedin: String::new(),
            },
        )
        .expect("first apply");
    let second = board
        .tracker
        .apply(
            &company,
            &job,
            &applicant,
            ApplicantSnapshot {
                name: "Ada L.".to_string(),
                email: "ada@new.example.com".to_string(),
                phone: String::new(),
                cv_link: "v2.pdf".to_string(),
                linkedin: String::new(),
            },
        )
        .expect("second apply");

    assert!(matches!(first, ApplyOutcome::Created(_)));
    assert!(matches!(second, ApplyOutcome::AlreadyApplied(_)));
    assert_eq!(first.application().id, second.application().id);

    let stored = board
        .tracker
        .get_application(&job, &applicant)
        .expect("stored");
    assert_eq!(stored.snapshot.cv_link, "v1.pdf");
    assert_eq!(stored.snapshot.email, "ada@example.com");
}

#[test]
fn snapshot_is_not_rewritten_when_profile_changes() {
    let board = board();
    let company = board.company("c1", "Acme");
    let job = board.job(&company, "Backend Engineer");
    let applicant = board.applicant("a1", "Ada");

    board
        .tracker
        .apply_with_profile(&company, &job, &applicant)
        .expect("applied");

    board
        .directory
        .update_profile(Account::Applicant(ApplicantProfile {
            id: applicant.clone(),
            name: "Ada Byron".to_string(),
            email: "byron@example.com".to_string(),
            phone: String::new(),
            linkedin: String::new(),
            cv_link: String::new(),
        }))
        .expect("profile updated");

    let outcome = board
        .tracker
        .apply_with_profile(&company, &job, &applicant)
        .expect("retry");
    assert!(!outcome.is_created());
    assert_eq!(outcome.into_application().snapshot.name, "Ada");
}

#[test]
fn missing_or_incomplete_profiles_are_terminal() {
    let board = board();
    let company = board.company("c1", "Acme");
    let job = board.job(&company, "Backend Engineer");

    let error = board
        .tracker
        .apply_with_profile(&company, &job, &AccountId::new("ghost"))
        .expect_err("no profile");
    assert_eq!(error, TrackerError::ProfileIncomplete);
    assert!(!error.is_retryable());
    assert_eq!(
        error.user_message(),
        "Could not fetch your profile. Please complete your profile first."
    );

    // A company account is not an applicant profile.
    let error = board
        .tracker
        .apply_with_profile(&company, &job, &company)
        .expect_err("wrong kind");
    assert_eq!(error, TrackerError::ProfileIncomplete);

    let error = board
        .tracker
        .apply(
            &company,
            &job,
            &AccountId::new("a1"),
            ApplicantSnapshot {
                name: "Ada".to_string(),
                email: "  ".to_string(),
                phone: String::new(),
                cv_link: String::new(),
                linkedin: String::new(),
            },
        )
        .expect_err("blank email");
    assert_eq!(error, TrackerError::ProfileIncomplete);
}

#[test]
fn apply_requires_the_job_under_that_company() {
    let board = board();
    let owner = board.company("c1", "Acme");
    let other = board.company("c2", "Globex");
    let job = board.job(&owner, "Backend Engineer");
    let applicant = board.applicant("a1", "Ada");

    assert_eq!(
        board
            .tracker
            .apply_with_profile(&other, &job, &applicant)
            .expect_err("wrong scope"),
        TrackerError::Catalog(CatalogError::PermissionDenied)
    );
    assert_eq!(
        board
            .tracker
            .apply_with_profile(&owner, &JobId::new("job-missing"), &applicant)
            .expect_err("no job"),
        TrackerError::Catalog(CatalogError::NotFound)
    );
}

#[test]
fn applicant_sees_own_applications_across_jobs() {
    let board = board();
    let company = board.company("c1", "Acme");
    let first = board.job(&company, "Backend Engineer");
    let second = board.job(&company, "Frontend Engineer");
    let applicant = board.applicant("a1", "Ada");
    board.applicant("a2", "Grace");

    for job in [&first, &second] {
        board
            .tracker
            .apply_with_profile(&company, job, &applicant)
            .expect("applied");
    }
    board
        .tracker
        .apply_with_profile(&company, &first, &AccountId::new("a2"))
        .expect("applied");

    let mine = board
        .tracker
        .list_for_applicant(&applicant)
        .expect("listing");
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|application| application.id == applicant));
    assert_eq!(
        board
            .tracker
            .list_for_job(&company, &first)
            .expect("listing")
            .len(),
        2
    );
}

#[test]
fn store_outage_is_retryable() {
    let store = Arc::new(MemoryDocumentStore::default());
    let directory = Arc::new(AccountDirectory::new(store.clone()));
    let catalog = Arc::new(JobCatalog::new(store.clone()));
    directory
        .create_profile(company("c1", "Acme"))
        .expect("company");
    let job = catalog
        .create_job(&AccountId::new("c1"), job_details("Welder"))
        .expect("job");

    let tracker = ApplicationTracker::new(Arc::new(UnavailableStore), catalog, directory);
    let error = tracker
        .apply(
            &AccountId::new("c1"),
            &job,
            &AccountId::new("a1"),
            ApplicantSnapshot::from(
                &applicant("a1", "Ada")
                    .into_applicant()
                    .expect("applicant fixture"),
            ),
        )
        .expect_err("store offline");
    assert!(matches!(error, TrackerError::Unavailable(_)));
    assert!(error.is_retryable());
}
