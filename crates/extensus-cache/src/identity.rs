//! Identity cache built on `moka`.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use moka::future::Cache;
use tracing::debug;

use extensus_core::error::AppError;
use extensus_core::result::AppResult;

/// A process-wide cache of resolved entities.
///
/// Entries are inserted only after a successful refresh and are never
/// updated in place, expired, or evicted. Concurrent misses on the same
/// key share a single refresh.
pub struct IdentityCache<K, V> {
    inner: Cache<K, Arc<V>>,
}

impl<K, V> Clone for IdentityCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> std::fmt::Debug for IdentityCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

impl<K, V> Default for IdentityCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IdentityCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Create an empty, unbounded cache.
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Return the entity stored under `key`, running `refresh` on a miss.
    ///
    /// A hit returns the stored entity without awaiting `refresh`. On a
    /// miss the refreshed value is inserted and returned; a refresh error
    /// is propagated and nothing is inserted.
    pub async fn resolve<F>(&self, key: K, refresh: F) -> AppResult<Arc<V>>
    where
        F: Future<Output = AppResult<V>>,
    {
        self.inner
            .try_get_with(key, async move {
                debug!("Identity cache miss, refreshing");
                refresh.await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<AppError>| Arc::unwrap_or_clone(e))
    }

    /// Whether an entity is stored under `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of stored entities, after pending maintenance has run.
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}
