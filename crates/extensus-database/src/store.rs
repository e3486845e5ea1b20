//! The account persistence contract.

use async_trait::async_trait;

use extensus_core::result::AppResult;
use extensus_core::types::AccountId;
use extensus_entity::{Account, AccountLookup, NewAccount};

/// Data-access interface for accounts.
///
/// Single-record fetches fail with `ErrorKind::NotFound` when no account
/// matches, so callers can tell a missing account apart from a storage
/// failure (`ErrorKind::Database`).
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch an account by identifier.
    async fn fetch_by_id(&self, id: AccountId) -> AppResult<Account>;

    /// Fetch an account by email address (case-insensitive).
    async fn fetch_by_email(&self, email: &str) -> AppResult<Account>;

    /// Persist a new account and return it with its assigned identifier.
    ///
    /// Fails with `ErrorKind::Conflict` if the email is already taken.
    async fn insert(&self, account: NewAccount) -> AppResult<Account>;

    /// Overwrite an existing account and return the stored version.
    async fn update(&self, account: &Account) -> AppResult<Account>;

    /// Delete an account. Returns `true` if it existed.
    async fn delete(&self, id: AccountId) -> AppResult<bool>;

    /// All accounts, ordered by identifier.
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Fetch an account by either lookup key.
    async fn fetch(&self, lookup: &AccountLookup) -> AppResult<Account> {
        match lookup {
            AccountLookup::ById(id) => self.fetch_by_id(*id).await,
            AccountLookup::ByEmail(email) => self.fetch_by_email(email).await,
        }
    }
}
