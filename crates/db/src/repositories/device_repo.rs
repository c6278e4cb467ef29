//! Repository for the base `devices` table.
//!
//! Also hosts the shared creation path: every concrete device kind inserts
//! its base row here, which is where the hardware ID gets derived.

use sqlx::{PgPool, Postgres, Transaction};
use validator::Validate;

use devicetrace_core::naming;
use devicetrace_core::types::DbId;

use crate::error::DbResult;
use crate::models::device::{Device, UpdateDevice};

/// Column list for `devices` queries.
pub(crate) const DEVICE_COLUMNS: &str = "\
    id, kind, hid, pid, gid, model, manufacturer, serial_number, \
    weight_kg, width_m, height_m, created_at, updated_at";

/// Column list for joined queries where `devices` is aliased as `d`.
pub(crate) const DEVICE_COLUMNS_PREFIXED: &str = "\
    d.id, d.kind, d.hid, d.pid, d.gid, d.model, d.manufacturer, d.serial_number, \
    d.weight_kg, d.width_m, d.height_m, d.created_at, d.updated_at";

/// Base columns of a device about to be inserted.
pub(crate) struct NewDevice<'a> {
    pub kind: &'a str,
    pub pid: Option<&'a str>,
    pub gid: Option<&'a str>,
    pub model: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
    pub serial_number: Option<&'a str>,
    pub weight_kg: Option<f64>,
    pub width_m: Option<f64>,
    pub height_m: Option<f64>,
}

/// Insert the base row for a new device.
///
/// Derives the hardware ID from (manufacturer, serial_number, model); when
/// the triple is incomplete the device is simply created without one.
pub(crate) async fn insert_device(
    tx: &mut Transaction<'_, Postgres>,
    new: &NewDevice<'_>,
) -> Result<Device, sqlx::Error> {
    let hid = naming::hid(new.manufacturer, new.serial_number, new.model);

    let query = format!(
        "INSERT INTO devices (\
            kind, hid, pid, gid, model, manufacturer, serial_number, \
            weight_kg, width_m, height_m\
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING {DEVICE_COLUMNS}"
    );
    sqlx::query_as::<_, Device>(&query)
        .bind(new.kind)
        .bind(hid)
        .bind(new.pid)
        .bind(new.gid)
        .bind(new.model)
        .bind(new.manufacturer)
        .bind(new.serial_number)
        .bind(new.weight_kg)
        .bind(new.width_m)
        .bind(new.height_m)
        .fetch_one(&mut **tx)
        .await
}

/// Provides lookups and base-field updates across all device kinds.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Find any device by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Device>> {
        let query = format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = $1");
        let device = sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(device)
    }

    /// Find a device by its hardware ID.
    pub async fn find_by_hid(pool: &PgPool, hid: &str) -> DbResult<Option<Device>> {
        let query = format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE hid = $1");
        let device = sqlx::query_as::<_, Device>(&query)
            .bind(hid)
            .fetch_optional(pool)
            .await?;
        Ok(device)
    }

    /// List devices ordered by ID.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> DbResult<Vec<Device>> {
        let query = format!(
            "SELECT {DEVICE_COLUMNS} FROM devices ORDER BY id LIMIT $1 OFFSET $2"
        );
        let devices = sqlx::query_as::<_, Device>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(devices)
    }

    /// Patch the mutable base fields of a device.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDevice,
    ) -> DbResult<Option<Device>> {
        input.validate()?;

        let query = format!(
            "UPDATE devices SET \
                pid = COALESCE($2, pid), \
                gid = COALESCE($3, gid), \
                weight_kg = COALESCE($4, weight_kg), \
                width_m = COALESCE($5, width_m), \
                height_m = COALESCE($6, height_m), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {DEVICE_COLUMNS}"
        );
        let device = sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .bind(input.pid.as_deref())
            .bind(input.gid.as_deref())
            .bind(input.weight_kg)
            .bind(input.width_m)
            .bind(input.height_m)
            .fetch_optional(pool)
            .await?;
        Ok(device)
    }

    /// Delete a device by ID. The joined subtype rows go with it, and when
    /// the device is a computer so do the base rows of its components: the
    /// FK cascade only removes their join and detail rows, which would leave
    /// orphaned `devices` records behind. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<bool> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "DELETE FROM devices \
             WHERE id IN (SELECT id FROM components WHERE parent_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
