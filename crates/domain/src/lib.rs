//! # deviceadm-domain
//!
//! Pure domain model for the device admission record store.
//!
//! ## Responsibilities
//! - Foundational types: the [`DeviceId`](id::DeviceId) newtype and error conventions
//! - Define the **Device** record (status, key material, identity, attributes)
//! - Define the **selective update document** ([`DeviceUpdate`](device::DeviceUpdate))
//!   and the merge law it applies
//! - Define the **listing query** (skip / limit / status filter)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod device;
pub mod query;
