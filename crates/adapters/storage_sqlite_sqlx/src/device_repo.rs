//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use deviceadm_app::ports::DeviceRepository;
use deviceadm_domain::device::{Attribute, Device, DeviceUpdate};
use deviceadm_domain::error::DeviceAdmError;
use deviceadm_domain::id::DeviceId;
use deviceadm_domain::query::DeviceQuery;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let status: String = row.try_get("status")?;
        let key: String = row.try_get("key")?;
        let device_identity: String = row.try_get("device_identity")?;
        let attributes_json: String = row.try_get("attributes")?;

        let attributes: Vec<Attribute> = serde_json::from_str(&attributes_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Device {
            id: DeviceId::from(id),
            status,
            key,
            device_identity,
            attributes,
        }))
    }
}

// `rowid` order keeps pages stable between calls when nothing is inserted
// in between. A negative LIMIT means no limit in SQLite.
const SELECT_PAGE: &str = r#"
    SELECT id, status, "key", device_identity, attributes
    FROM devices
    WHERE (?1 IS NULL OR status = ?1)
    ORDER BY rowid
    LIMIT ?2 OFFSET ?3
"#;

const SELECT_BY_ID: &str =
    r#"SELECT id, status, "key", device_identity, attributes FROM devices WHERE id = ?"#;

// Unset parameters are NULL: they fall back to the zero value on insert and
// to the stored value on update. `id` is never in the SET list.
const UPSERT: &str = r#"
    INSERT INTO devices (id, status, "key", device_identity, attributes)
    VALUES (?1, COALESCE(?2, ''), COALESCE(?3, ''), COALESCE(?4, ''), COALESCE(?5, '[]'))
    ON CONFLICT (id) DO UPDATE SET
        status = COALESCE(?2, status),
        "key" = COALESCE(?3, "key"),
        device_identity = COALESCE(?4, device_identity),
        attributes = COALESCE(?5, attributes)
"#;

const NO_LIMIT: i64 = -1;

/// `SQLite`-backed device repository.
///
/// Every operation checks a connection out of the pool and holds it for the
/// duration of that operation only; dropping the guard returns it, including
/// on error.
#[derive(Clone)]
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn find(
        &self,
        query: DeviceQuery,
    ) -> impl Future<Output = Result<Vec<Device>, DeviceAdmError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::List)?;

            let limit = query.max_results().map_or(NO_LIMIT, i64::from);
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
                .bind(query.status.as_deref())
                .bind(limit)
                .bind(i64::from(query.skip))
                .fetch_all(&mut *conn)
                .await
                .map_err(StorageError::List)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DeviceAdmError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut conn = pool.acquire().await.map_err(StorageError::Get)?;

            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&mut *conn)
                .await
                .map_err(StorageError::Get)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn upsert(
        &self,
        update: DeviceUpdate,
    ) -> impl Future<Output = Result<(), DeviceAdmError>> + Send {
        let pool = self.pool.clone();
        async move {
            let attributes_json = update
                .attributes
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(StorageError::PutAttributes)?;

            let mut conn = pool.acquire().await.map_err(StorageError::Put)?;

            let result = sqlx::query(UPSERT)
                .bind(update.id.as_str())
                .bind(update.status.as_deref())
                .bind(update.key.as_deref())
                .bind(update.device_identity.as_deref())
                .bind(attributes_json)
                .execute(&mut *conn)
                .await
                .map_err(StorageError::Put)?;

            tracing::debug!(
                device_id = %update.id,
                empty_update = update.is_empty(),
                rows_affected = result.rows_affected(),
                "device upserted"
            );

            Ok(())
        }
    }
}
