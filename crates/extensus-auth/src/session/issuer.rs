//! Sign-in: credential verification and token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use extensus_core::error::AppError;
use extensus_core::result::AppResult;
use extensus_database::AccountStore;
use extensus_entity::Account;

use crate::error::AuthError;
use crate::password::PasswordHasher;
use crate::token::TokenCodec;

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// The account that signed in.
    pub account: Account,
    /// Session token to deliver as the `token` cookie.
    pub token: String,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Verifies submitted credentials and mints session tokens.
#[derive(Debug, Clone)]
pub struct SessionIssuer {
    store: Arc<dyn AccountStore>,
    hasher: Arc<PasswordHasher>,
    codec: Arc<TokenCodec>,
}

impl SessionIssuer {
    /// Creates a new issuer.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            store,
            hasher,
            codec,
        }
    }

    /// Sign in with an email and password.
    ///
    /// An unknown email and a wrong password produce the same
    /// `ErrorKind::Authentication` error, and both spend one password
    /// verification.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<IssuedSession> {
        let account = self.check_credentials(email, password).await?;

        let issued = self.codec.issue(account.id)?;
        info!(account_id = %account.id, "Sign-in successful");

        Ok(IssuedSession {
            account,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    async fn check_credentials(&self, email: &str, password: &str) -> AppResult<Account> {
        let account = match self.store.fetch_by_email(email).await {
            Ok(account) => account,
            Err(err) if err.is_not_found() => {
                self.hasher.verify_dummy(password);
                warn!(reason = %AuthError::NoSuchAccount, "Sign-in failed");
                return Err(AuthError::NoSuchAccount.into());
            }
            Err(err) => return Err(err),
        };

        if !self
            .hasher
            .verify_password(password, account.password_hash())?
        {
            warn!(account_id = %account.id, reason = %AuthError::BadCredentials, "Sign-in failed");
            return Err(AppError::from(AuthError::BadCredentials));
        }

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    use extensus_core::error::ErrorKind;
    use extensus_database::MemoryAccountStore;
    use extensus_entity::NewAccount;

    use crate::error::SIGN_IN_FAILED;

    struct Fixture {
        issuer: SessionIssuer,
        codec: Arc<TokenCodec>,
        account: Account,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
        let hasher = Arc::new(PasswordHasher::new(1024, 1, 1).unwrap());
        let codec = Arc::new(TokenCodec::new("issuer-secret", Duration::days(5)).unwrap());

        let account = store
            .insert(NewAccount {
                name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
                password_hash: hasher.hash_password("cobol-forever").unwrap(),
            })
            .await
            .unwrap();

        Fixture {
            issuer: SessionIssuer::new(store, hasher, codec.clone()),
            codec,
            account,
        }
    }

    #[tokio::test]
    async fn test_correct_credentials_issue_token() {
        let f = fixture().await;
        let session = f
            .issuer
            .sign_in("grace@example.com", "cobol-forever")
            .await
            .unwrap();

        assert_eq!(session.account.id, f.account.id);
        assert_eq!(f.codec.validate(&session.token).unwrap(), f.account.id);
        let remaining = session.expires_at - Utc::now();
        assert!(remaining > Duration::days(5) - Duration::minutes(1));
    }

    #[tokio::test]
    async fn test_email_lookup_ignores_case() {
        let f = fixture().await;
        assert!(
            f.issuer
                .sign_in("Grace@Example.COM", "cobol-forever")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_identical() {
        let f = fixture().await;
        let wrong_password = f
            .issuer
            .sign_in("grace@example.com", "fortran")
            .await
            .unwrap_err();
        let unknown_email = f
            .issuer
            .sign_in("nobody@example.com", "cobol-forever")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.kind, ErrorKind::Authentication);
        assert_eq!(wrong_password.kind, unknown_email.kind);
        assert_eq!(wrong_password.message, unknown_email.message);
        assert_eq!(wrong_password.message, SIGN_IN_FAILED);
    }
}
