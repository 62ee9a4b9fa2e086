//! # deviceadm-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** the storage backend must implement:
//!   - `DeviceRepository` — `find`, `find_by_id` and `upsert` primitives
//! - Define the **use-case** struct callers drive:
//!   - `DeviceService` — list (paginated, filtered), get by id, put with
//!     selective merge
//!
//! ## Dependency rule
//! Depends on `deviceadm-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
