//! Account registration and password management.

use std::sync::Arc;

use tracing::info;
use validator::{Validate, ValidationErrors};

use extensus_core::config::SeedAccountConfig;
use extensus_core::error::AppError;
use extensus_core::result::AppResult;
use extensus_core::types::AccountId;
use extensus_database::AccountStore;
use extensus_entity::{Account, NewAccount};

use crate::password::{PasswordHasher, PasswordPolicy};

/// Creates accounts and changes passwords, enforcing field formats and
/// the password policy before anything reaches the store.
#[derive(Debug, Clone)]
pub struct AccountRegistrar {
    store: Arc<dyn AccountStore>,
    hasher: Arc<PasswordHasher>,
    policy: PasswordPolicy,
}

impl AccountRegistrar {
    /// Creates a new registrar.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            store,
            hasher,
            policy,
        }
    }

    /// Register a new account.
    ///
    /// Fails with `ErrorKind::Validation` on a bad name, email, or password
    /// and with `ErrorKind::Conflict` when the email is taken.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<Account> {
        let name = name.trim();
        let email = email.trim();
        self.policy.validate(password, &[name, email])?;

        let account = NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: self.hasher.hash_password(password)?,
        };
        account.validate().map_err(|e| describe(&e))?;

        let account = self.store.insert(account).await?;
        info!(account_id = %account.id, "Registered account");
        Ok(account)
    }

    /// Replace an account's password.
    pub async fn change_password(&self, id: AccountId, new_password: &str) -> AppResult<Account> {
        let mut account = self.store.fetch_by_id(id).await?;
        self.policy
            .validate(new_password, &[&account.name, &account.email])?;

        account.set_password_hash(self.hasher.hash_password(new_password)?);
        let account = self.store.update(&account).await?;
        info!(account_id = %account.id, "Changed account password");
        Ok(account)
    }

    /// Register the configured seed account unless its email is already taken.
    ///
    /// Returns the new account, or `None` if nothing was created.
    pub async fn seed(&self, seed: &SeedAccountConfig) -> AppResult<Option<Account>> {
        match self.store.fetch_by_email(&seed.email).await {
            Ok(existing) => {
                info!(account_id = %existing.id, "Seed account already present");
                Ok(None)
            }
            Err(err) if err.is_not_found() => self
                .register(&seed.name, &seed.email, &seed.password)
                .await
                .map(Some),
            Err(err) => Err(err),
        }
    }
}

/// Collapse field validation failures into one validation error.
fn describe(errors: &ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ");

    AppError::validation(message)
}
