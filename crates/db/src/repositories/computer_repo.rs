//! Repository for computers and the components they own.

use sqlx::PgPool;
use validator::Validate;

use devicetrace_core::types::DbId;

use crate::error::DbResult;
use crate::models::computer::{ComputerWithComponents, CreateComputer};
use crate::models::device::Device;
use crate::repositories::device_repo::{insert_device, NewDevice, DEVICE_COLUMNS_PREFIXED};

/// Provides CRUD operations for computers.
pub struct ComputerRepo;

impl ComputerRepo {
    /// Register a new computer of the given concrete kind.
    pub async fn create(pool: &PgPool, input: &CreateComputer) -> DbResult<Device> {
        input.validate()?;

        let mut tx = pool.begin().await?;
        let device = insert_device(
            &mut tx,
            &NewDevice {
                kind: input.kind.as_str(),
                pid: input.pid.as_deref(),
                gid: input.gid.as_deref(),
                model: input.model.as_deref(),
                manufacturer: input.manufacturer.as_deref(),
                serial_number: input.serial_number.as_deref(),
                weight_kg: input.weight_kg,
                width_m: input.width_m,
                height_m: input.height_m,
            },
        )
        .await?;
        sqlx::query("INSERT INTO computers (id) VALUES ($1)")
            .bind(device.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(device)
    }

    /// Find a computer by ID. Returns None for non-computer devices.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Device>> {
        let query = format!(
            "SELECT {DEVICE_COLUMNS_PREFIXED} FROM devices d \
             JOIN computers c ON c.id = d.id \
             WHERE d.id = $1"
        );
        let device = sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(device)
    }

    /// IDs of the components installed in a computer, ordered by ID.
    pub async fn component_ids(pool: &PgPool, id: DbId) -> DbResult<Vec<DbId>> {
        let rows: Vec<(DbId,)> =
            sqlx::query_as("SELECT id FROM components WHERE parent_id = $1 ORDER BY id")
                .bind(id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// A computer with id-only references to its components.
    pub async fn find_with_components(
        pool: &PgPool,
        id: DbId,
    ) -> DbResult<Option<ComputerWithComponents>> {
        let Some(device) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let components = Self::component_ids(pool, id).await?;
        Ok(Some(ComputerWithComponents {
            url: device.url(),
            device,
            components,
        }))
    }

    /// Delete a computer and every component installed in it.
    ///
    /// The FK cascade between subtype tables only removes the joined rows;
    /// the owned components' base rows are deleted here so no orphaned
    /// device records remain. Returns true if the computer existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<bool> {
        let mut tx = pool.begin().await?;
        sqlx::query(
            "DELETE FROM devices \
             WHERE id IN (SELECT id FROM components WHERE parent_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let result = sqlx::query(
            "DELETE FROM devices \
             WHERE id = $1 AND id IN (SELECT id FROM computers)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
