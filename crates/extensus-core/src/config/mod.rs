//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::{AuthConfig, MAX_SESSION_TTL_HOURS, SeedAccountConfig};
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Account store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `EXTENSUS__`, then validates
    /// the result.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EXTENSUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.session_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.session_ttl_hours must be greater than zero",
            ));
        }
        if self.auth.session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.session_ttl_hours must be at most {MAX_SESSION_TTL_HOURS}"
            )));
        }
        if !self.auth.landing_path.starts_with('/') {
            return Err(AppError::configuration(
                "auth.landing_path must be an absolute path",
            ));
        }
        if self.auth.password_min_strength > 4 {
            return Err(AppError::configuration(
                "auth.password_min_strength must be between 0 and 4",
            ));
        }
        if self.database.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres provider",
            ));
        }
        match self.logging.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(AppError::configuration(format!(
                "logging.format must be 'json' or 'pretty', got '{other}'"
            ))),
        }
    }
}
