//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use extensus_core::config::AuthConfig;
use extensus_core::error::AppError;
use extensus_entity::HashedPassword;

/// Plaintext hashed at construction so that verification work can be
/// spent even when no account exists.
const DUMMY_PASSWORD: &str = "extensus-timing-equalizer";

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    dummy_hash: HashedPassword,
}

impl PasswordHasher {
    /// Create a hasher with explicit Argon2 cost parameters.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            dummy_hash: HashedPassword::from_phc(String::new()),
        };
        hasher.dummy_hash = hasher.hash_password(DUMMY_PASSWORD)?;
        Ok(hasher)
    }

    /// Create a hasher from the `auth` configuration section.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        Self::new(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
        )
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<HashedPassword, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(HashedPassword::from_phc(hash.to_string()))
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not. The
    /// cost parameters are taken from the stored hash.
    pub fn verify_password(&self, password: &str, hash: &HashedPassword) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash.as_phc())
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Run a verification whose result is discarded.
    pub fn verify_dummy(&self, password: &str) {
        let _ = self.verify_password(password, &self.dummy_hash);
    }
}
