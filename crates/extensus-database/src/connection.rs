//! PostgreSQL connection pool setup.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use extensus_core::config::DatabaseConfig;
use extensus_core::error::{AppError, ErrorKind};
use extensus_core::result::AppResult;

/// Open a PostgreSQL pool sized and timed from configuration.
///
/// `connect_timeout_seconds` bounds every later pool acquire as well.
pub async fn connect_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    info!(
        url = %redact_url(&config.url),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

    info!("Connected to PostgreSQL");
    Ok(pool)
}

/// Replace the password in a connection URL with `****` for logging.
fn redact_url(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    let Some((user, _password)) = credentials.split_once(':') else {
        return url.to_string();
    };
    match scheme {
        Some(scheme) => format!("{scheme}://{user}:****@{host}"),
        None => format!("{user}:****@{host}"),
    }
}
