//! Authentication failure taxonomy.

use thiserror::Error;

use extensus_core::error::AppError;
use extensus_core::types::AccountId;

/// Message shown for every failed sign-in, whatever the cause.
pub const SIGN_IN_FAILED: &str = "Invalid email or password";

/// Why a token or a credential check was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token could not be parsed.
    #[error("token is malformed")]
    MalformedToken,
    /// The token was signed with another key or algorithm.
    #[error("token signature is invalid")]
    BadSignature,
    /// The token's expiry has passed.
    #[error("token has expired")]
    Expired,
    /// No account is registered under the submitted email.
    #[error("no account matches the submitted email")]
    NoSuchAccount,
    /// The submitted password does not match the stored hash.
    #[error("password does not match")]
    BadCredentials,
    /// A validly signed token names an account that no longer exists.
    #[error("account {0} could not be resolved")]
    Resolution(AccountId),
    /// The token could not be signed.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl AuthError {
    /// Whether this is a sign-in failure that must look the same to the caller
    /// regardless of its cause.
    pub fn is_credential_failure(&self) -> bool {
        matches!(self, Self::NoSuchAccount | Self::BadCredentials)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(_) => AppError::with_source(
                extensus_core::error::ErrorKind::Internal,
                "Failed to issue session token",
                err,
            ),
            err if err.is_credential_failure() => AppError::authentication(SIGN_IN_FAILED),
            other => AppError::authentication(other.to_string()),
        }
    }
}
