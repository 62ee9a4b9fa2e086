//! Storage-specific error type wrapping sqlx errors.

use deviceadm_domain::error::DeviceAdmError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Listing devices failed.
    #[error("failed to fetch device list")]
    List(#[source] sqlx::Error),

    /// Fetching a single device failed.
    #[error("failed to fetch device")]
    Get(#[source] sqlx::Error),

    /// Upserting a device failed.
    #[error("failed to store device")]
    Put(#[source] sqlx::Error),

    /// Encoding the attribute list for an upsert failed.
    #[error("failed to store device")]
    PutAttributes(#[source] serde_json::Error),

    /// Connecting or checking out a connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for DeviceAdmError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
