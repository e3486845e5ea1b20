//! Keys an account can be looked up by.

use std::fmt;

use extensus_core::types::AccountId;

/// Lookup key for an account, either by its identifier or its email.
///
/// Email keys are normalized to lowercase so that differently cased
/// addresses resolve to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AccountLookup {
    /// Lookup by numeric identifier.
    ById(AccountId),
    /// Lookup by email address.
    ByEmail(String),
}

impl AccountLookup {
    /// Build an email lookup with a normalized address.
    pub fn by_email(email: &str) -> Self {
        Self::ByEmail(email.trim().to_lowercase())
    }
}

impl From<AccountId> for AccountLookup {
    fn from(id: AccountId) -> Self {
        Self::ById(id)
    }
}

impl fmt::Display for AccountLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ById(id) => write!(f, "id:{id}"),
            Self::ByEmail(email) => write!(f, "email:{email}"),
        }
    }
}
