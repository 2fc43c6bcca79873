use serde::{Deserialize, Serialize};

/// Opaque identity token issued by the credential collaborator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two disjoint roles an account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Company,
    Applicant,
}

impl AccountKind {
    pub const fn label(self) -> &'static str {
        match self {
            AccountKind::Company => "company",
            AccountKind::Applicant => "applicant",
        }
    }
}

/// Result of resolving an identity against the account store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Company,
    Applicant,
    Unknown,
}

impl From<Option<AccountKind>> for Classification {
    fn from(value: Option<AccountKind>) -> Self {
        match value {
            Some(AccountKind::Company) => Classification::Company,
            Some(AccountKind::Applicant) => Classification::Applicant,
            None => Classification::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub cv_link: String,
}

/// Stored account record. The variant tag is persisted so classification never depends
/// on which collection a document happens to live in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Account {
    Company(CompanyProfile),
    Applicant(ApplicantProfile),
}

impl Account {
    pub fn id(&self) -> &AccountId {
        match self {
            Account::Company(profile) => &profile.id,
            Account::Applicant(profile) => &profile.id,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Company(_) => AccountKind::Company,
            Account::Applicant(_) => AccountKind::Applicant,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Account::Company(profile) => &profile.name,
            Account::Applicant(profile) => &profile.name,
        }
    }

    pub fn as_company(&self) -> Option<&CompanyProfile> {
        match self {
            Account::Company(profile) => Some(profile),
            Account::Applicant(_) => None,
        }
    }

    pub fn into_applicant(self) -> Option<ApplicantProfile> {
        match self {
            Account::Applicant(profile) => Some(profile),
            Account::Company(_) => None,
        }
    }
}
