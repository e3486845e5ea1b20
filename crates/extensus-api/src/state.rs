//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use extensus_auth::{
    AccountRegistrar, IdentityResolver, PasswordHasher, PasswordPolicy, SessionIssuer, TokenCodec,
};
use extensus_core::config::AppConfig;
use extensus_core::result::AppResult;
use extensus_database::AccountStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Account persistence
    pub accounts: Arc<dyn AccountStore>,
    /// Session token to account resolution
    pub resolver: Arc<IdentityResolver>,
    /// Sign-in and token issuance
    pub issuer: Arc<SessionIssuer>,
    /// Account registration and password changes
    pub registrar: Arc<AccountRegistrar>,
}

impl AppState {
    /// Wire the auth services over `accounts`.
    pub fn new(config: AppConfig, accounts: Arc<dyn AccountStore>) -> AppResult<Self> {
        let codec = Arc::new(TokenCodec::from_config(&config.auth)?);
        let hasher = Arc::new(PasswordHasher::from_config(&config.auth)?);
        let policy = PasswordPolicy::from_config(&config.auth);

        let resolver = Arc::new(IdentityResolver::new(
            Arc::clone(&codec),
            Arc::clone(&accounts),
        ));
        let issuer = Arc::new(SessionIssuer::new(
            Arc::clone(&accounts),
            Arc::clone(&hasher),
            Arc::clone(&codec),
        ));
        let registrar = Arc::new(AccountRegistrar::new(
            Arc::clone(&accounts),
            Arc::clone(&hasher),
            policy,
        ));

        Ok(Self {
            config: Arc::new(config),
            accounts,
            resolver,
            issuer,
            registrar,
        })
    }
}
