//! Account entity model.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use extensus_core::types::AccountId;

use super::password::HashedPassword;

/// Display names are words of letters and `,.'-`, separated by single spaces.
pub static VALID_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z,.'-]+ ?)+$").expect("name pattern compiles")
});

/// A registered account.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    /// Unique account identifier, assigned by the store.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Email address, unique across accounts.
    pub email: String,
    #[serde(skip_serializing)]
    password_hash: HashedPassword,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// The stored password hash.
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }

    /// Replace the password hash and bump the modification time.
    pub fn set_password_hash(&mut self, hash: HashedPassword) {
        self.password_hash = hash;
        self.updated_at = Utc::now();
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Validate)]
pub struct NewAccount {
    /// Display name.
    #[validate(regex(path = *VALID_NAME, message = "Name contains invalid characters"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    /// Hash of the chosen password.
    pub password_hash: HashedPassword,
}

impl NewAccount {
    /// Materialize the account once the store has assigned an identifier.
    pub fn into_account(self, id: AccountId, now: DateTime<Utc>) -> Account {
        Account {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
