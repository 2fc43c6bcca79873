use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::RepositoryError;
use crate::accounts::{
    Account, AccountId, AccountRepository, CompanyProfile, CredentialError, CredentialVerifier,
};
use crate::applications::{Application, ApplicationRepository};
use crate::jobs::{Job, JobId, JobRepository};

/// Process-local document store backing every board repository.
#[derive(Default, Clone)]
pub struct MemoryDocumentStore {
    accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
    jobs: Arc<Mutex<HashMap<JobId, Job>>>,
    applications: Arc<Mutex<BTreeMap<(JobId, AccountId), Application>>>,
}

impl AccountRepository for MemoryDocumentStore {
    fn insert(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut guard = self.accounts.lock().expect("account mutex poisoned");
        if guard.contains_key(account.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(account.id().clone(), account.clone());
        Ok(account)
    }

    fn update(&self, account: Account) -> Result<(), RepositoryError> {
        let mut guard = self.accounts.lock().expect("account mutex poisoned");
        match guard.get_mut(account.id()) {
            Some(existing) => {
                *existing = account;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        let guard = self.accounts.lock().expect("account mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn companies(&self) -> Result<Vec<CompanyProfile>, RepositoryError> {
        let guard = self.accounts.lock().expect("account mutex poisoned");
        let mut companies: Vec<CompanyProfile> = guard
            .values()
            .filter_map(Account::as_company)
            .cloned()
            .collect();
        companies.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(companies)
    }
}

impl JobRepository for MemoryDocumentStore {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut guard = self.jobs.lock().expect("job mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.jobs.lock().expect("job mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn by_company(&self, company_id: &AccountId) -> Result<Vec<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        Ok(guard
            .values()
            .filter(|job| &job.company_id == company_id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<Job>, RepositoryError> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

impl ApplicationRepository for MemoryDocumentStore {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        let key = (application.job_id.clone(), application.id.clone());
        if guard.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(key, application.clone());
        Ok(application)
    }

    fn update(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        let key = (application.job_id.clone(), application.id.clone());
        match guard.get_mut(&key) {
            Some(existing) => {
                *existing = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(
        &self,
        job_id: &JobId,
        applicant_id: &AccountId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard.get(&(job_id.clone(), applicant_id.clone())).cloned())
    }

    fn for_job(&self, job_id: &JobId) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| &application.job_id == job_id)
            .cloned()
            .collect())
    }

    fn for_applicant(
        &self,
        applicant_id: &AccountId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| &application.id == applicant_id)
            .cloned()
            .collect())
    }
}

/// Credential collaborator that keeps registrations in memory.
#[derive(Default, Clone)]
pub struct MemoryCredentials {
    users: Arc<Mutex<HashMap<String, (String, AccountId)>>>,
}

static UID_SEQUENCE: AtomicU64 = AtomicU64::new(1);

impl MemoryCredentials {
    /// Register a known identity, e.g. for seeding demo data.
    pub fn with_user(self, email: &str, password: &str, id: AccountId) -> Self {
        self.users
            .lock()
            .expect("credential mutex poisoned")
            .insert(email.to_ascii_lowercase(), (password.to_string(), id));
        self
    }
}

impl CredentialVerifier for MemoryCredentials {
    fn verify(&self, email: &str, password: &str) -> Result<AccountId, CredentialError> {
        let guard = self.users.lock().expect("credential mutex poisoned");
        match guard.get(&email.to_ascii_lowercase()) {
            None => Err(CredentialError::NoSuchUser),
            Some((stored, _)) if stored != password => Err(CredentialError::InvalidCredential),
            Some((_, id)) => Ok(id.clone()),
        }
    }

    fn register(&self, email: &str, password: &str) -> Result<AccountId, CredentialError> {
        let mut guard = self.users.lock().expect("credential mutex poisoned");
        let key = email.to_ascii_lowercase();
        if guard.contains_key(&key) {
            return Err(CredentialError::EmailInUse);
        }
        let id = AccountId(format!("uid-{:06}", UID_SEQUENCE.fetch_add(1, Ordering::Relaxed)));
        guard.insert(key, (password.to_string(), id.clone()));
        Ok(id)
    }

    fn unregister(&self, id: &AccountId) -> Result<(), CredentialError> {
        let mut guard = self.users.lock().expect("credential mutex poisoned");
        guard.retain(|_, (_, registered)| registered != id);
        Ok(())
    }
}
