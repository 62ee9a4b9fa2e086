//! Device service — list, get and put use-cases for device records.

use deviceadm_domain::device::{Device, DeviceUpdate};
use deviceadm_domain::error::{DeviceAdmError, NotFoundError};
use deviceadm_domain::id::DeviceId;
use deviceadm_domain::query::DeviceQuery;

use crate::ports::DeviceRepository;

/// Application service for the device record store.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List devices, skipping the first `skip` matches and returning at most
    /// `limit` of the rest (`0` means no limit). An empty `status` lists
    /// devices in every state.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository; no partial
    /// results are returned alongside it.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices(
        &self,
        skip: u32,
        limit: u32,
        status: &str,
    ) -> Result<Vec<Device>, DeviceAdmError> {
        self.repo.find(DeviceQuery::new(skip, limit, status)).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceAdmError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self), fields(device_id = %id))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, DeviceAdmError> {
        self.repo
            .find_by_id(id.clone())
            .await?
            .ok_or_else(|| NotFoundError { id }.into())
    }

    /// Create the device if its id is new, otherwise overwrite only the
    /// fields `device` sets (non-empty strings, non-empty attribute list).
    ///
    /// A supplied attribute list replaces the stored one as a whole.
    ///
    /// An empty id is rejected before the store is touched. A bare document
    /// upsert would instead create (or update) a record keyed by `""` that
    /// every id-less caller then shares; the validation error is a deliberate
    /// addition to the storage-only failure contract.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceAdmError::Validation`] if the id is empty, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id))]
    pub async fn put_device(&self, device: Device) -> Result<(), DeviceAdmError> {
        device.validate()?;
        self.repo.upsert(DeviceUpdate::from(device)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deviceadm_domain::device::{Attribute, DeviceStatus};
    use deviceadm_domain::error::ValidationError;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryDeviceRepo {
        store: Mutex<Vec<Device>>,
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn find(
            &self,
            query: DeviceQuery,
        ) -> impl Future<Output = Result<Vec<Device>, DeviceAdmError>> + Send {
            let store = self.store.lock().unwrap();
            let matching = store
                .iter()
                .filter(|d| query.matches_status(&d.status))
                .skip(query.skip as usize);
            let result: Vec<Device> = match query.max_results() {
                Some(limit) => matching.take(limit as usize).cloned().collect(),
                None => matching.cloned().collect(),
            };
            async { Ok(result) }
        }

        fn find_by_id(
            &self,
            id: DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, DeviceAdmError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.iter().find(|d| d.id == id).cloned();
            async { Ok(result) }
        }

        fn upsert(
            &self,
            update: DeviceUpdate,
        ) -> impl Future<Output = Result<(), DeviceAdmError>> + Send {
            let mut store = self.store.lock().unwrap();
            match store.iter_mut().find(|d| d.id == update.id) {
                Some(existing) => update.apply_to(existing),
                None => store.push(update.into_new_device()),
            }
            async { Ok(()) }
        }
    }

    fn make_service() -> DeviceService<InMemoryDeviceRepo> {
        DeviceService::new(InMemoryDeviceRepo::default())
    }

    fn device(id: &str, status: DeviceStatus) -> Device {
        Device::builder().id(id).status(status).build().unwrap()
    }

    #[tokio::test]
    async fn should_create_device_on_first_put() {
        let svc = make_service();
        svc.put_device(
            Device::builder()
                .id("dev1")
                .status(DeviceStatus::Pending)
                .key("k1")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        let fetched = svc.get_device(DeviceId::new("dev1")).await.unwrap();
        assert_eq!(fetched.status, "pending");
        assert_eq!(fetched.key, "k1");

        let all = svc.list_devices(0, 0, "").await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn should_reject_put_when_id_is_empty() {
        let svc = make_service();
        let result = svc
            .put_device(Device {
                status: "pending".to_string(),
                ..Device::default()
            })
            .await;

        assert!(matches!(
            result,
            Err(DeviceAdmError::Validation(ValidationError::EmptyId))
        ));
        assert!(svc.list_devices(0, 0, "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_device_missing() {
        let svc = make_service();
        let result = svc.get_device(DeviceId::new("nonexistent")).await;
        assert!(matches!(
            result,
            Err(DeviceAdmError::NotFound(NotFoundError { id })) if id.as_str() == "nonexistent"
        ));
    }

    #[tokio::test]
    async fn should_keep_unset_fields_on_partial_update() {
        let svc = make_service();
        svc.put_device(
            Device::builder()
                .id("dev1")
                .status(DeviceStatus::Pending)
                .key("k1")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        svc.put_device(device("dev1", DeviceStatus::Accepted))
            .await
            .unwrap();

        let fetched = svc.get_device(DeviceId::new("dev1")).await.unwrap();
        assert_eq!(fetched.status, "accepted");
        assert_eq!(fetched.key, "k1");
        assert_eq!(svc.list_devices(0, 0, "").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_replace_attributes_instead_of_merging() {
        let svc = make_service();
        svc.put_device(
            Device::builder()
                .id("dev1")
                .attribute("a", "1")
                .attribute("b", "2")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        svc.put_device(Device::builder().id("dev1").attribute("c", "3").build().unwrap())
            .await
            .unwrap();

        let fetched = svc.get_device(DeviceId::new("dev1")).await.unwrap();
        assert_eq!(fetched.attributes, vec![Attribute::new("c", "3")]);
    }

    #[tokio::test]
    async fn should_filter_by_status() {
        let svc = make_service();
        svc.put_device(device("d1", DeviceStatus::Pending))
            .await
            .unwrap();
        svc.put_device(device("d2", DeviceStatus::Accepted))
            .await
            .unwrap();
        svc.put_device(device("d3", DeviceStatus::Pending))
            .await
            .unwrap();

        let pending = svc.list_devices(0, 10, "pending").await.unwrap();
        let ids: Vec<&str> = pending.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["d1", "d3"]);
    }

    #[tokio::test]
    async fn should_paginate_with_skip_and_limit() {
        let svc = make_service();
        for i in 0..5 {
            svc.put_device(device(&format!("d{i}"), DeviceStatus::Pending))
                .await
                .unwrap();
        }

        let first = svc.list_devices(0, 2, "").await.unwrap();
        let second = svc.list_devices(2, 2, "").await.unwrap();
        let tail = svc.list_devices(4, 2, "").await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(tail.len(), 1);
        assert!(second.iter().all(|d| !first.contains(d)));
    }

    #[tokio::test]
    async fn should_return_empty_list_when_nothing_matches() {
        let svc = make_service();
        svc.put_device(device("d1", DeviceStatus::Accepted))
            .await
            .unwrap();

        let rejected = svc.list_devices(0, 10, "rejected").await.unwrap();
        assert!(rejected.is_empty());
    }
}
