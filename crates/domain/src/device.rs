//! Device — a registration record kept by the admission service.
//!
//! String fields use the empty string as "unset", matching the persisted
//! layout, so a partially populated [`Device`] doubles as an update request
//! (see [`DeviceUpdate`]).

mod attribute;
mod status;
mod update;

pub use attribute::Attribute;
pub use status::{DeviceStatus, UnknownStatus};
pub use update::DeviceUpdate;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceAdmError, ValidationError};
use crate::id::DeviceId;

/// A device registration record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub id: DeviceId,
    pub status: String,
    pub key: String,
    pub device_identity: String,
    pub attributes: Vec<Attribute>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceAdmError::Validation`] when `id` is empty.
    pub fn validate(&self) -> Result<(), DeviceAdmError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    status: Option<String>,
    key: Option<String>,
    device_identity: Option<String>,
    attributes: Vec<Attribute>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<DeviceId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn device_identity(mut self, identity: impl Into<String>) -> Self {
        self.device_identity = Some(identity.into());
        self
    }

    /// Append a single attribute, keeping insertion order.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`DeviceAdmError::Validation`] if `id` is missing or empty.
    pub fn build(self) -> Result<Device, DeviceAdmError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            key: self.key.unwrap_or_default(),
            device_identity: self.device_identity.unwrap_or_default(),
            attributes: self.attributes,
        };
        device.validate()?;
        Ok(device)
    }
}
