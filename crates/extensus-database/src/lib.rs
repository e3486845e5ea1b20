//! # extensus-database
//!
//! Persistence boundary for accounts: the [`AccountStore`] trait, a
//! PostgreSQL implementation over a `sqlx` pool, and a process-local
//! implementation used in development and tests.

pub mod connection;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use tracing::info;

use extensus_core::config::{DatabaseConfig, StoreProvider};
use extensus_core::result::AppResult;

pub use connection::connect_pool;
pub use repositories::{MemoryAccountStore, PgAccountStore};
pub use store::AccountStore;

/// Build the account store selected by `database.provider`.
pub async fn connect_store(config: &DatabaseConfig) -> AppResult<Arc<dyn AccountStore>> {
    match config.provider {
        StoreProvider::Memory => {
            info!("Using in-memory account store");
            Ok(Arc::new(MemoryAccountStore::new()))
        }
        StoreProvider::Postgres => {
            let pool = connect_pool(config).await?;
            let store = PgAccountStore::new(pool);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
    }
}
