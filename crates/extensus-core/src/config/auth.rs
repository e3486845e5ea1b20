//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Longest accepted session validity window: ten years.
pub const MAX_SESSION_TTL_HOURS: u64 = 10 * 366 * 24;

/// Authentication, session cookie, and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256). Must not be empty.
    #[serde(default)]
    pub jwt_secret: String,
    /// Session validity window in hours, at most [`MAX_SESSION_TTL_HOURS`].
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Whether the session cookie carries the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Where signed-in users land after sign-in.
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn score (0-4). Zero disables the strength check.
    #[serde(default)]
    pub password_min_strength: u8,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
    /// Account registered at startup when no account with its email exists.
    #[serde(default)]
    pub seed_account: Option<SeedAccountConfig>,
}

/// Credentials of the account created on first start.
#[derive(Clone, Serialize, Deserialize)]
pub struct SeedAccountConfig {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

impl std::fmt::Debug for SeedAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAccountConfig")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AuthConfig {
    /// The session validity window in seconds.
    pub fn session_ttl_seconds(&self) -> i64 {
        i64::try_from(self.session_ttl_hours.saturating_mul(3600)).unwrap_or(i64::MAX)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_ttl_hours: default_session_ttl(),
            cookie_secure: false,
            landing_path: default_landing_path(),
            password_min_length: default_password_min(),
            password_min_strength: 0,
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
            seed_account: None,
        }
    }
}

fn default_session_ttl() -> u64 {
    120
}

fn default_landing_path() -> String {
    "/dashboard".to_string()
}

fn default_password_min() -> usize {
    8
}

fn default_hash_memory() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}
