//! `SQLite` connection pool setup and migration runner.

use std::env::VarError;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

const DATABASE_URL_VAR: &str = "DEVICEADM_DATABASE_URL";
const MAX_CONNECTIONS_VAR: &str = "DEVICEADM_DB_MAX_CONNECTIONS";

/// Configuration for the `SQLite` storage adapter.
///
/// Deserializable so a host process can embed it in its own config file;
/// missing keys fall back to [`Config::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:deviceadm.db` or `sqlite::memory:`).
    pub database_url: String,
    /// Upper bound on pooled connections; each store operation checks out one.
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:deviceadm.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or not unicode.
    #[error("missing environment variable {name}")]
    Missing {
        name: &'static str,
        #[source]
        source: VarError,
    },
    /// An optional environment variable is set but not valid unicode.
    #[error("environment variable {name} is not valid unicode")]
    NotUnicode {
        name: &'static str,
        #[source]
        source: VarError,
    },
    /// A numeric setting could not be parsed.
    #[error("invalid value for {name}")]
    InvalidNumber {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// `DEVICEADM_DATABASE_URL` is required; `DEVICEADM_DB_MAX_CONNECTIONS`
    /// is optional.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the URL is not set, or the connection limit
    /// is set but not a unicode number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Result<String, VarError>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR).map_err(|source| ConfigError::Missing {
            name: DATABASE_URL_VAR,
            source,
        })?;

        let max_connections = match lookup(MAX_CONNECTIONS_VAR) {
            Ok(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidNumber {
                    name: MAX_CONNECTIONS_VAR,
                    source,
                })?,
            Err(VarError::NotPresent) => Self::default().max_connections,
            Err(source) => {
                return Err(ConfigError::NotUnicode {
                    name: MAX_CONNECTIONS_VAR,
                    source,
                });
            }
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url, self.max_connections).await
    }
}

/// Holds the `SQLite` connection pool and provides access to it.
///
/// Cloning the pool is cheap; every clone shares the same connections.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::debug!(max_connections, "device store database ready");

        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
