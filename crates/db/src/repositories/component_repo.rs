//! Repository for components and the similarity lookup.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use validator::Validate;

use devicetrace_core::error::CoreError;
use devicetrace_core::kind::{ComponentKind, DeviceKind};
use devicetrace_core::types::DbId;

use crate::error::{DbError, DbResult};
use crate::models::component::{
    AnyComponent, Component, CreateGraphicCard, CreateHardDrive, CreateMotherboard,
    CreateNetworkAdapter, CreateRamModule, GraphicCard, HardDrive, Motherboard, NetworkAdapter,
    RamModule,
};
use crate::models::device::PropValue;
use crate::repositories::device_repo::{insert_device, NewDevice, DEVICE_COLUMNS_PREFIXED};

/// SELECT over the three-way join for one component kind, with the caller's
/// WHERE conditions. `devices` is aliased `d`, `components` `c`, and the
/// detail table `v`.
fn select_sql(kind: ComponentKind, conditions: &str) -> String {
    let extras = kind
        .detail_columns()
        .iter()
        .map(|col| format!("v.{col}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {DEVICE_COLUMNS_PREFIXED}, c.parent_id, {extras} \
         FROM devices d \
         JOIN components c ON c.id = d.id \
         JOIN {table} v ON v.id = d.id \
         WHERE {conditions}",
        table = kind.detail_table(),
    )
}

/// Fetch the first component matching a similarity query.
///
/// Binds in fixed order: parent id, then the present physical property
/// values, then the excluded-id list.
async fn fetch_similar<T>(
    pool: &PgPool,
    sql: &str,
    parent_id: DbId,
    props: &[PropValue],
    blacklist: &[DbId],
) -> Result<Option<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut query = sqlx::query_as::<_, T>(sql).bind(parent_id);
    for value in props {
        query = match value {
            PropValue::Text(s) => query.bind(s.clone()),
            PropValue::Int(i) => query.bind(*i),
            PropValue::Real(f) => query.bind(*f),
        };
    }
    query.bind(blacklist.to_vec()).fetch_optional(pool).await
}

/// Provides CRUD operations and similarity lookup for components.
pub struct ComponentRepo;

impl ComponentRepo {
    // -----------------------------------------------------------------------
    // Creation (one transaction across devices + components + detail table)
    // -----------------------------------------------------------------------

    /// Register a new graphic card.
    pub async fn create_graphic_card(
        pool: &PgPool,
        input: &CreateGraphicCard,
    ) -> DbResult<GraphicCard> {
        input.validate()?;

        let mut tx = pool.begin().await?;
        let device = insert_device(
            &mut tx,
            &NewDevice {
                kind: ComponentKind::GraphicCard.as_str(),
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
        sqlx::query("INSERT INTO components (id, parent_id) VALUES ($1, $2)")
            .bind(device.id)
            .bind(input.parent_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO graphic_cards (id, memory_mb) VALUES ($1, $2)")
            .bind(device.id)
            .bind(input.memory_mb)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(GraphicCard {
            component: Component {
                device,
                parent_id: input.parent_id,
            },
            memory_mb: input.memory_mb,
        })
    }

    /// Register a new hard drive. Intake records (erasure, tests,
    /// benchmarks) are persisted but never serialized back out.
    pub async fn create_hard_drive(pool: &PgPool, input: &CreateHardDrive) -> DbResult<HardDrive> {
        input.validate()?;

        let mut tx = pool.begin().await?;
        let device = insert_device(
            &mut tx,
            &NewDevice {
                kind: ComponentKind::HardDrive.as_str(),
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
        sqlx::query("INSERT INTO components (id, parent_id) VALUES ($1, $2)")
            .bind(device.id)
            .bind(input.parent_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO hard_drives (id, size_mb, erasure, tests, benchmarks) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(device.id)
        .bind(input.size_mb)
        .bind(input.erasure.as_ref())
        .bind(input.tests.as_ref())
        .bind(input.benchmarks.as_ref())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(HardDrive {
            component: Component {
                device,
                parent_id: input.parent_id,
            },
            size_mb: input.size_mb,
            erasure: input.erasure.clone(),
            tests: input.tests.clone(),
            benchmarks: input.benchmarks.clone(),
        })
    }

    /// Register a new motherboard.
    pub async fn create_motherboard(
        pool: &PgPool,
        input: &CreateMotherboard,
    ) -> DbResult<Motherboard> {
        input.validate()?;

        let mut tx = pool.begin().await?;
        let device = insert_device(
            &mut tx,
            &NewDevice {
                kind: ComponentKind::Motherboard.as_str(),
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
        sqlx::query("INSERT INTO components (id, parent_id) VALUES ($1, $2)")
            .bind(device.id)
            .bind(input.parent_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO motherboards (id, slots, usb, firewire, serial, pcmcia) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(device.id)
        .bind(input.slots)
        .bind(input.usb)
        .bind(input.firewire)
        .bind(input.serial)
        .bind(input.pcmcia)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Motherboard {
            component: Component {
                device,
                parent_id: input.parent_id,
            },
            slots: input.slots,
            usb: input.usb,
            firewire: input.firewire,
            serial: input.serial,
            pcmcia: input.pcmcia,
        })
    }

    /// Register a new network adapter.
    pub async fn create_network_adapter(
        pool: &PgPool,
        input: &CreateNetworkAdapter,
    ) -> DbResult<NetworkAdapter> {
        input.validate()?;

        let mut tx = pool.begin().await?;
        let device = insert_device(
            &mut tx,
            &NewDevice {
                kind: ComponentKind::NetworkAdapter.as_str(),
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
        sqlx::query("INSERT INTO components (id, parent_id) VALUES ($1, $2)")
            .bind(device.id)
            .bind(input.parent_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO network_adapters (id, speed_mbps) VALUES ($1, $2)")
            .bind(device.id)
            .bind(input.speed_mbps)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(NetworkAdapter {
            component: Component {
                device,
                parent_id: input.parent_id,
            },
            speed_mbps: input.speed_mbps,
        })
    }

    /// Register a new RAM module.
    pub async fn create_ram_module(pool: &PgPool, input: &CreateRamModule) -> DbResult<RamModule> {
        input.validate()?;

        let mut tx = pool.begin().await?;
        let device = insert_device(
            &mut tx,
            &NewDevice {
                kind: ComponentKind::RamModule.as_str(),
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
        sqlx::query("INSERT INTO components (id, parent_id) VALUES ($1, $2)")
            .bind(device.id)
            .bind(input.parent_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO ram_modules (id, size_mb, speed_mhz) VALUES ($1, $2, $3)")
            .bind(device.id)
            .bind(input.size_mb)
            .bind(input.speed_mhz)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(RamModule {
            component: Component {
                device,
                parent_id: input.parent_id,
            },
            size_mb: input.size_mb,
            speed_mhz: input.speed_mhz,
        })
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Find a component of any concrete kind by ID.
    pub async fn find(pool: &PgPool, id: DbId) -> DbResult<Option<AnyComponent>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT d.kind FROM devices d JOIN components c ON c.id = d.id WHERE d.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        let Some((kind,)) = row else {
            return Ok(None);
        };
        let kind = match DeviceKind::from_str(&kind)? {
            DeviceKind::Component(kind) => kind,
            DeviceKind::Computer(_) => {
                return Err(DbError::Core(CoreError::Internal(format!(
                    "Device {id} is in the components table but has computer kind {kind}"
                ))));
            }
        };

        let sql = select_sql(kind, "d.id = $1");
        let found = match kind {
            ComponentKind::GraphicCard => sqlx::query_as::<_, GraphicCard>(&sql)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(AnyComponent::GraphicCard),
            ComponentKind::HardDrive => sqlx::query_as::<_, HardDrive>(&sql)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(AnyComponent::HardDrive),
            ComponentKind::Motherboard => sqlx::query_as::<_, Motherboard>(&sql)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(AnyComponent::Motherboard),
            ComponentKind::NetworkAdapter => sqlx::query_as::<_, NetworkAdapter>(&sql)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(AnyComponent::NetworkAdapter),
            ComponentKind::RamModule => sqlx::query_as::<_, RamModule>(&sql)
                .bind(id)
                .fetch_optional(pool)
                .await?
                .map(AnyComponent::RamModule),
        };
        Ok(found)
    }

    /// Base rows of the components installed in a computer, ordered by ID.
    pub async fn list_by_parent(pool: &PgPool, parent_id: DbId) -> DbResult<Vec<Component>> {
        let query = format!(
            "SELECT {DEVICE_COLUMNS_PREFIXED}, c.parent_id \
             FROM devices d \
             JOIN components c ON c.id = d.id \
             WHERE c.parent_id = $1 \
             ORDER BY d.id"
        );
        let components = sqlx::query_as::<_, Component>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await?;
        Ok(components)
    }

    /// Install a component into a computer, or detach it with None.
    /// Returns true if the component exists.
    pub async fn set_parent(
        pool: &PgPool,
        id: DbId,
        parent_id: Option<DbId>,
    ) -> DbResult<bool> {
        let result =
            sqlx::query("UPDATE components SET parent_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(parent_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Similarity lookup
    // -----------------------------------------------------------------------

    /// Find a component equivalent to `probe` among the components of
    /// `parent_id`: same concrete kind, no hardware ID, every physical
    /// property equal (absent matches absent), and not in `blacklist`.
    ///
    /// Components without serials cannot be identified by key, so identity
    /// across repeated inventory scans is inferred structurally. Returns
    /// [`CoreError::NotFound`] naming the kind when nothing matches.
    ///
    /// # Panics
    ///
    /// Panics if `probe` has a hardware ID. An identified component must be
    /// matched by its hid, never structurally; calling this with one is a
    /// programming error.
    pub async fn similar_one(
        pool: &PgPool,
        probe: &AnyComponent,
        parent_id: DbId,
        blacklist: &[DbId],
    ) -> DbResult<AnyComponent> {
        assert!(
            probe.device().hid.is_none(),
            "similar_one requires an anonymous component (no hardware ID)"
        );

        let kind = probe.kind();
        tracing::debug!(
            kind = kind.as_str(),
            parent_id,
            excluded = blacklist.len(),
            "searching for a similar component"
        );

        // Build the WHERE clause with positional binds; absent properties
        // become IS NULL conditions and bind nothing.
        let mut conditions = vec![
            format!("d.kind = '{}'", kind.as_str()),
            "c.parent_id = $1".to_string(),
            "d.hid IS NULL".to_string(),
        ];
        let mut binds: Vec<PropValue> = Vec::new();
        let mut bind_idx = 2u32;

        for (column, value) in probe.device().physical_properties() {
            match value {
                Some(value) => {
                    conditions.push(format!("d.{column} = ${bind_idx}"));
                    bind_idx += 1;
                    binds.push(value);
                }
                None => conditions.push(format!("d.{column} IS NULL")),
            }
        }
        for (column, value) in probe.extra_properties() {
            match value {
                Some(value) => {
                    conditions.push(format!("v.{column} = ${bind_idx}"));
                    bind_idx += 1;
                    binds.push(value);
                }
                None => conditions.push(format!("v.{column} IS NULL")),
            }
        }
        conditions.push(format!("NOT (d.id = ANY(${bind_idx}))"));

        let sql = format!(
            "{} ORDER BY d.id LIMIT 1",
            select_sql(kind, &conditions.join(" AND "))
        );

        let found = match kind {
            ComponentKind::GraphicCard => {
                fetch_similar::<GraphicCard>(pool, &sql, parent_id, &binds, blacklist)
                    .await?
                    .map(AnyComponent::GraphicCard)
            }
            ComponentKind::HardDrive => {
                fetch_similar::<HardDrive>(pool, &sql, parent_id, &binds, blacklist)
                    .await?
                    .map(AnyComponent::HardDrive)
            }
            ComponentKind::Motherboard => {
                fetch_similar::<Motherboard>(pool, &sql, parent_id, &binds, blacklist)
                    .await?
                    .map(AnyComponent::Motherboard)
            }
            ComponentKind::NetworkAdapter => {
                fetch_similar::<NetworkAdapter>(pool, &sql, parent_id, &binds, blacklist)
                    .await?
                    .map(AnyComponent::NetworkAdapter)
            }
            ComponentKind::RamModule => {
                fetch_similar::<RamModule>(pool, &sql, parent_id, &binds, blacklist)
                    .await?
                    .map(AnyComponent::RamModule)
            }
        };

        found.ok_or_else(|| {
            DbError::Core(CoreError::NotFound {
                device_type: kind.as_str().to_string(),
            })
        })
    }
}
