use std::sync::Arc;

use crate::accounts::{
    Account, AccountDirectory, AccountId, AccountKind, ApplicantProfile, Classification,
    DirectoryError,
};
use crate::store::MemoryDocumentStore;
use crate::testing::*;

fn directory() -> AccountDirectory<MemoryDocumentStore> {
    AccountDirectory::new(Arc::new(MemoryDocumentStore::default()))
}

#[test]
fn classifies_each_kind_and_unknown() {
    let directory = directory();
    directory
        .create_profile(company("c1", "Acme"))
        .expect("company created");
    directory
        .create_profile(applicant("a1", "Ada"))
        .expect("applicant created");

    assert_eq!(
        directory.classify(&AccountId::new("c1")).expect("lookup"),
        Classification::Company
    );
    assert_eq!(
        directory.classify(&AccountId::new("a1")).expect("lookup"),
        Classification::Applicant
    );
    assert_eq!(
        directory.classify(&AccountId::new("nobody")).expect("lookup"),
        Classification::Unknown
    );
}

#[test]
fn identity_cannot_be_provisioned_under_both_kinds() {
    let directory = directory();
    directory
        .create_profile(company("dual", "Acme"))
        .expect("company created");

    match directory.create_profile(applicant("dual", "Ada")) {
        Err(DirectoryError::Conflict) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(
        directory.classify(&AccountId::new("dual")).expect("lookup"),
        Classification::Company
    );
}

#[test]
fn get_profile_requires_matching_kind() {
    let directory = directory();
    directory
        .create_profile(applicant("a1", "Ada"))
        .expect("applicant created");

    let profile = directory
        .get_profile(AccountKind::Applicant, &AccountId::new("a1"))
        .expect("applicant profile");
    assert_eq!(profile.name(), "Ada");

    match directory.get_profile(AccountKind::Company, &AccountId::new("a1")) {
        Err(DirectoryError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn backend_failure_is_unavailable_not_unknown() {
    let directory = AccountDirectory::new(Arc::new(UnavailableStore));

    let error = directory
        .classify(&AccountId::new("c1"))
        .expect_err("lookup fails");
    assert!(matches!(error, DirectoryError::Unavailable(_)));
    assert!(error.is_retryable());
}

#[test]
fn update_keeps_kind_fixed() {
    let directory = directory();
    directory
        .create_profile(applicant("a1", "Ada"))
        .expect("applicant created");

    let renamed = Account::Applicant(ApplicantProfile {
        id: AccountId::new("a1"),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: String::new(),
        linkedin: String::new(),
        cv_link: String::new(),
    });
    directory.update_profile(renamed).expect("update succeeds");
    assert_eq!(
        directory
            .applicant(&AccountId::new("a1"))
            .expect("profile")
            .name,
        "Ada Lovelace"
    );

    match directory.update_profile(company("a1", "Not allowed")) {
        Err(DirectoryError::PermissionDenied) => {}
        other => panic!("expected permission denied, got {other:?}"),
    }

    match directory.update_profile(applicant("ghost", "Nobody")) {
        Err(DirectoryError::NotFound) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn blank_ids_are_rejected() {
    let directory = directory();
    match directory.create_profile(company("  ", "Acme")) {
        Err(DirectoryError::MissingId) => {}
        other => panic!("expected missing id, got {other:?}"),
    }
}

#[test]
fn lists_only_companies() {
    let directory = directory();
    directory
        .create_profile(company("c2", "Globex"))
        .expect("created");
    directory
        .create_profile(company("c1", "Acme"))
        .expect("created");
    directory
        .create_profile(applicant("a1", "Ada"))
        .expect("created");

    let names: Vec<String> = directory
        .list_companies()
        .expect("companies")
        .into_iter()
        .map(|company| company.name)
        .collect();
    assert_eq!(names, vec!["Acme".to_string(), "Globex".to_string()]);
}
