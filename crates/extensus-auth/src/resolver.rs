//! Resolution of a session token to the account it was issued to.

use std::sync::Arc;

use tracing::{debug, warn};

use extensus_cache::IdentityCache;
use extensus_core::result::AppResult;
use extensus_database::AccountStore;
use extensus_entity::{Account, AccountLookup};

use crate::error::AuthError;
use crate::token::TokenCodec;

/// Outcome of resolving a request's session token.
///
/// Storage failures are not a resolution; they surface as the `Err` side of
/// [`IdentityResolver::resolve`].
#[derive(Debug, Clone)]
pub enum Resolution {
    /// No token was presented.
    Anonymous,
    /// A token was presented but did not identify a live account.
    Rejected(AuthError),
    /// The token identifies this account.
    Authenticated(Arc<Account>),
}

impl Resolution {
    /// The resolved account, if any.
    pub fn account(&self) -> Option<&Arc<Account>> {
        match self {
            Self::Authenticated(account) => Some(account),
            Self::Anonymous | Self::Rejected(_) => None,
        }
    }
}

/// Turns raw session tokens into accounts, consulting the identity cache
/// before the store.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    codec: Arc<TokenCodec>,
    store: Arc<dyn AccountStore>,
    cache: IdentityCache<AccountLookup, Account>,
}

impl IdentityResolver {
    /// Create a resolver with an empty cache.
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn AccountStore>) -> Self {
        Self {
            codec,
            store,
            cache: IdentityCache::new(),
        }
    }

    /// The cache backing this resolver.
    pub fn cache(&self) -> &IdentityCache<AccountLookup, Account> {
        &self.cache
    }

    /// Resolve the raw cookie value of a request.
    pub async fn resolve(&self, raw_token: Option<&str>) -> AppResult<Resolution> {
        let token = match raw_token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(Resolution::Anonymous),
        };

        let subject = match self.codec.validate(token) {
            Ok(subject) => subject,
            Err(err) => {
                warn!(error = %err, "Rejected session token");
                return Ok(Resolution::Rejected(err));
            }
        };

        let store = Arc::clone(&self.store);
        let fetched = self
            .cache
            .resolve(AccountLookup::ById(subject), async move {
                store.fetch_by_id(subject).await
            })
            .await;

        match fetched {
            Ok(account) => {
                debug!(account_id = %account.id, "Resolved session identity");
                Ok(Resolution::Authenticated(account))
            }
            Err(err) if err.is_not_found() => {
                warn!(account_id = %subject, "Session token names a missing account");
                Ok(Resolution::Rejected(AuthError::Resolution(subject)))
            }
            Err(err) => Err(err),
        }
    }
}
