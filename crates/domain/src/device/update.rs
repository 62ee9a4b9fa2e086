//! Selective update document for upserts.
//!
//! A caller hands the store a partially populated [`Device`]; only the fields
//! it actually set may overwrite what is persisted. [`DeviceUpdate`] makes
//! that explicit: each mutable field is `Some` only when the source value was
//! non-empty. The identifier is the match key and is never part of the set.

use super::{Attribute, Device};
use crate::id::DeviceId;

/// The fields to write for one upsert, keyed by device id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceUpdate {
    pub id: DeviceId,
    pub status: Option<String>,
    pub key: Option<String>,
    pub device_identity: Option<String>,
    /// Replaces the stored list wholesale when present; entries are not
    /// merged by name.
    pub attributes: Option<Vec<Attribute>>,
}

impl DeviceUpdate {
    /// `true` when no field besides the id would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.key.is_none()
            && self.device_identity.is_none()
            && self.attributes.is_none()
    }

    /// Apply this update to `device`, leaving unset fields untouched.
    ///
    /// The id of `device` is not modified.
    pub fn apply_to(&self, device: &mut Device) {
        if let Some(status) = &self.status {
            device.status.clone_from(status);
        }
        if let Some(key) = &self.key {
            device.key.clone_from(key);
        }
        if let Some(identity) = &self.device_identity {
            device.device_identity.clone_from(identity);
        }
        if let Some(attributes) = &self.attributes {
            device.attributes.clone_from(attributes);
        }
    }

    /// Build the record inserted when no device with this id exists yet.
    #[must_use]
    pub fn into_new_device(self) -> Device {
        let mut device = Device {
            id: self.id.clone(),
            ..Device::default()
        };
        self.apply_to(&mut device);
        device
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl From<Device> for DeviceUpdate {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            status: non_empty(device.status),
            key: non_empty(device.key),
            device_identity: non_empty(device.device_identity),
            attributes: (!device.attributes.is_empty()).then_some(device.attributes),
        }
    }
}
