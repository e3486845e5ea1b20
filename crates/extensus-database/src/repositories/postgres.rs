//! PostgreSQL account store.
//!
//! The `accounts` table is created by [`PgAccountStore::ensure_schema`].
//! Email uniqueness is enforced on `LOWER(email)`, matching the
//! case-insensitive lookups.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use extensus_core::error::{AppError, ErrorKind};
use extensus_core::result::AppResult;
use extensus_core::types::AccountId;
use extensus_entity::{Account, NewAccount};

use crate::store::AccountStore;

/// DDL for the `accounts` table and its case-insensitive email index.
pub const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS accounts (
    id            BIGSERIAL PRIMARY KEY,
    name          TEXT        NOT NULL,
    email         TEXT        NOT NULL,
    password_hash TEXT        NOT NULL,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at    TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE UNIQUE INDEX IF NOT EXISTS accounts_email_lower ON accounts (LOWER(email));
";

const COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// Email predicate; uses the `accounts_email_lower` index.
const EMAIL_MATCH: &str = "LOWER(email) = LOWER($1)";

/// Account store backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new store over an open pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `accounts` table and email index if they are missing.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create accounts schema", e)
            })?;
        info!("Accounts schema ready");
        Ok(())
    }
}

/// Map a write failure, turning a unique-constraint hit into a conflict.
fn write_error(err: sqlx::Error, context: &str) -> AppError {
    if let sqlx::Error::Database(db) = &err
        && db.is_unique_violation()
    {
        return AppError::conflict("An account with this email already exists");
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn fetch_by_id(&self, id: AccountId) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM accounts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch account by id", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    async fn fetch_by_email(&self, email: &str) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {COLUMNS} FROM accounts WHERE {EMAIL_MATCH}"
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch account by email", e)
        })?
        .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (name, email, password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, NOW(), NOW()) RETURNING {COLUMNS}"
        ))
        .bind(&account.name)
        .bind(account.email.trim())
        .bind(account.password_hash.as_phc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to insert account"))
    }

    async fn update(&self, account: &Account) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(&format!(
            "UPDATE accounts SET name = $2, email = $3, password_hash = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(account.id)
        .bind(&account.name)
        .bind(account.email.trim())
        .bind(account.password_hash().as_phc())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update account"))?
        .ok_or_else(|| AppError::not_found(format!("Account {} not found", account.id)))
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete account", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM accounts ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }
}
