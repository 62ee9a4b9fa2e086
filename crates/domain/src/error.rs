//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DeviceAdmError`] via `From`; storage failures are boxed so the domain
//! never names a backend crate.

use crate::id::DeviceId;

/// Top-level error returned by every device store operation.
#[derive(Debug, thiserror::Error)]
pub enum DeviceAdmError {
    /// The caller supplied a value that violates a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A point lookup matched no record.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The storage backend failed; the source names the failed operation.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A device must carry a non-empty identifier to be stored.
    #[error("device id must not be empty")]
    EmptyId,
}

/// No device with the given identifier exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device not found: {id}")]
pub struct NotFoundError {
    pub id: DeviceId,
}
