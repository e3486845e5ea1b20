//! HS256 session token issuance and validation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use extensus_core::config::AuthConfig;
use extensus_core::types::AccountId;

use super::claims::Claims;
use crate::error::AuthError;

/// A freshly signed token and the moment it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWT.
    pub token: String,
    /// Expiry embedded in the token.
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens with a shared HMAC secret.
///
/// Only HS256 is accepted and expiry is checked without leeway.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    window: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("window", &self.window)
            .finish()
    }
}

impl TokenCodec {
    /// Create a codec for `secret` issuing tokens valid for `window`.
    ///
    /// Fails with [`AuthError::Signing`] when the secret is empty.
    pub fn new(secret: &str, window: Duration) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Signing("signing secret is empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            window,
        })
    }

    /// Create a codec from the `auth` configuration section.
    ///
    /// Fails with [`AuthError::Signing`] when the validity window does not
    /// fit in a [`Duration`].
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let window = Duration::try_seconds(config.session_ttl_seconds()).ok_or_else(|| {
            AuthError::Signing(format!(
                "session window of {} hours is out of range",
                config.session_ttl_hours
            ))
        })?;
        Self::new(&config.jwt_secret, window)
    }

    /// The validity window applied by [`issue`](Self::issue).
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Issue a token for `subject` valid for the configured window.
    pub fn issue(&self, subject: AccountId) -> Result<IssuedToken, AuthError> {
        self.issue_with_window(subject, self.window)
    }

    /// Issue a token for `subject` valid for `window` from now.
    pub fn issue_with_window(
        &self,
        subject: AccountId,
        window: Duration,
    ) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(window)
            .ok_or_else(|| AuthError::Signing("token expiry is out of range".to_string()))?;
        let claims = Claims {
            id: subject,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Verify `token` and return its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::Expired,
                JwtErrorKind::InvalidSignature
                | JwtErrorKind::InvalidAlgorithm
                | JwtErrorKind::InvalidAlgorithmName
                | JwtErrorKind::InvalidKeyFormat => AuthError::BadSignature,
                _ if declared_algorithm(token).is_some_and(|alg| alg != "HS256") => {
                    AuthError::BadSignature
                }
                _ => AuthError::MalformedToken,
            })
    }

    /// Verify `token` and return the account it was issued to.
    pub fn validate(&self, token: &str) -> Result<AccountId, AuthError> {
        self.decode(token).map(|claims| claims.id)
    }
}

/// The `alg` a token's header names, if the header is readable.
///
/// Algorithms jsonwebtoken does not know (`none` among them) fail header
/// parsing, so they are recognized here.
fn declared_algorithm(token: &str) -> Option<String> {
    let header = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(header).ok()?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    header.get("alg")?.as_str().map(str::to_string)
}
