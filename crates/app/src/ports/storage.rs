//! Storage port — the primitives the device store needs from its backend.
//!
//! Implementations hold a handle to a shared connection resource and must be
//! usable from concurrent callers. Each call uses its own connection for the
//! duration of the call and releases it on every exit path.

use std::future::Future;

use deviceadm_domain::device::{Device, DeviceUpdate};
use deviceadm_domain::error::DeviceAdmError;
use deviceadm_domain::id::DeviceId;
use deviceadm_domain::query::DeviceQuery;

/// Backend primitives for persisting [`Device`] records.
pub trait DeviceRepository {
    /// Return the devices selected by `query`, in the backend's natural order.
    ///
    /// Returns an empty vector when nothing matches.
    fn find(
        &self,
        query: DeviceQuery,
    ) -> impl Future<Output = Result<Vec<Device>, DeviceAdmError>> + Send;

    /// Get a device by its identifier.
    fn find_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DeviceAdmError>> + Send;

    /// Insert the device if `update.id` is unknown, otherwise write only the
    /// fields set in `update`. Must be a single atomic write.
    fn upsert(
        &self,
        update: DeviceUpdate,
    ) -> impl Future<Output = Result<(), DeviceAdmError>> + Send;
}
