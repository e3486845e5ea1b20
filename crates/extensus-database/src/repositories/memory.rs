//! Process-local account store using `dashmap`.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use extensus_core::error::AppError;
use extensus_core::result::AppResult;
use extensus_core::types::AccountId;
use extensus_entity::{Account, NewAccount};

use crate::store::AccountStore;

/// In-memory account store. Contents are lost when the process exits.
///
/// Emails are indexed in lowercase, so lookups and the uniqueness check
/// ignore case.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<DashMap<AccountId, Account>>,
    emails: Arc<DashMap<String, AccountId>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryAccountStore {
    /// Create an empty store. Identifiers start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn missing(id: AccountId) -> AppError {
    AppError::not_found(format!("Account {id} not found"))
}

fn email_taken() -> AppError {
    AppError::conflict("An account with this email already exists")
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn fetch_by_id(&self, id: AccountId) -> AppResult<Account> {
        self.accounts
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| missing(id))
    }

    async fn fetch_by_email(&self, email: &str) -> AppResult<Account> {
        let id = self
            .emails
            .get(&email_key(email))
            .map(|entry| *entry.value())
            .ok_or_else(|| AppError::not_found("Account not found"))?;
        self.fetch_by_id(id).await
    }

    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        match self.emails.entry(email_key(&account.email)) {
            Entry::Occupied(_) => Err(email_taken()),
            Entry::Vacant(slot) => {
                let id = AccountId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
                let account = account.into_account(id, Utc::now());
                self.accounts.insert(id, account.clone());
                slot.insert(id);
                debug!(account_id = %id, "Inserted account");
                Ok(account)
            }
        }
    }

    async fn update(&self, account: &Account) -> AppResult<Account> {
        let previous_email = self
            .accounts
            .get(&account.id)
            .map(|entry| email_key(&entry.email))
            .ok_or_else(|| missing(account.id))?;

        let new_email = email_key(&account.email);
        if new_email != previous_email {
            match self.emails.entry(new_email) {
                Entry::Occupied(_) => return Err(email_taken()),
                Entry::Vacant(slot) => {
                    slot.insert(account.id);
                }
            }
            self.emails.remove(&previous_email);
        }

        let mut stored = account.clone();
        stored.updated_at = Utc::now();
        self.accounts.insert(account.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        match self.accounts.remove(&id) {
            Some((_, account)) => {
                self.emails.remove(&email_key(&account.email));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }
}
