//! Component entities and DTOs.
//!
//! A component is a device installed inside a computer. Components usually
//! lack a reliable serial-based identity, so they are re-identified across
//! inventory scans structurally: same parent, same kind, same measurable
//! attributes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use devicetrace_core::kind::ComponentKind;
use devicetrace_core::types::DbId;

use crate::models::device::{Device, PropValue};

/// A row from `devices` joined with `components`: the record shared by every
/// component kind.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Component {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub device: Device,
    /// The computer this component is installed in, as an id-only reference.
    pub parent_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Concrete component entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GraphicCard {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub component: Component,
    pub memory_mb: Option<i16>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HardDrive {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub component: Component,
    pub size_mb: Option<i32>,
    /// Erasure record supplied at intake. Never serialized back out.
    #[serde(skip_serializing)]
    pub erasure: Option<serde_json::Value>,
    /// Surface-test records supplied at intake. Never serialized back out.
    #[serde(skip_serializing)]
    pub tests: Option<serde_json::Value>,
    /// Benchmark records supplied at intake. Never serialized back out.
    #[serde(skip_serializing)]
    pub benchmarks: Option<serde_json::Value>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Motherboard {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub component: Component,
    pub slots: Option<i16>,
    pub usb: Option<i16>,
    pub firewire: Option<i16>,
    pub serial: Option<i16>,
    pub pcmcia: Option<i16>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NetworkAdapter {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub component: Component,
    pub speed_mbps: Option<i16>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RamModule {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub component: Component,
    pub size_mb: Option<i16>,
    pub speed_mhz: Option<f64>,
}

/// A component of any concrete kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnyComponent {
    GraphicCard(GraphicCard),
    HardDrive(HardDrive),
    Motherboard(Motherboard),
    NetworkAdapter(NetworkAdapter),
    RamModule(RamModule),
}

impl AnyComponent {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::GraphicCard(_) => ComponentKind::GraphicCard,
            Self::HardDrive(_) => ComponentKind::HardDrive,
            Self::Motherboard(_) => ComponentKind::Motherboard,
            Self::NetworkAdapter(_) => ComponentKind::NetworkAdapter,
            Self::RamModule(_) => ComponentKind::RamModule,
        }
    }

    pub fn component(&self) -> &Component {
        match self {
            Self::GraphicCard(c) => &c.component,
            Self::HardDrive(c) => &c.component,
            Self::Motherboard(c) => &c.component,
            Self::NetworkAdapter(c) => &c.component,
            Self::RamModule(c) => &c.component,
        }
    }

    pub fn device(&self) -> &Device {
        &self.component().device
    }

    pub fn id(&self) -> DbId {
        self.device().id
    }

    /// The kind-specific physical attributes, in detail-table column order.
    /// Intake records (erasure, tests, benchmarks) are not physical
    /// attributes and never participate in similarity matching.
    pub fn extra_properties(&self) -> Vec<(&'static str, Option<PropValue>)> {
        match self {
            Self::GraphicCard(c) => vec![(
                "memory_mb",
                c.memory_mb.map(|v| PropValue::Int(v.into())),
            )],
            Self::HardDrive(c) => vec![("size_mb", c.size_mb.map(|v| PropValue::Int(v.into())))],
            Self::Motherboard(c) => vec![
                ("slots", c.slots.map(|v| PropValue::Int(v.into()))),
                ("usb", c.usb.map(|v| PropValue::Int(v.into()))),
                ("firewire", c.firewire.map(|v| PropValue::Int(v.into()))),
                ("serial", c.serial.map(|v| PropValue::Int(v.into()))),
                ("pcmcia", c.pcmcia.map(|v| PropValue::Int(v.into()))),
            ],
            Self::NetworkAdapter(c) => vec![(
                "speed_mbps",
                c.speed_mbps.map(|v| PropValue::Int(v.into())),
            )],
            Self::RamModule(c) => vec![
                ("size_mb", c.size_mb.map(|v| PropValue::Int(v.into()))),
                ("speed_mhz", c.speed_mhz.map(PropValue::Real)),
            ],
        }
    }

    /// All physical properties: the shared base record followed by the
    /// kind-specific attributes.
    pub fn physical_properties(&self) -> Vec<(&'static str, Option<PropValue>)> {
        let mut props = self.device().physical_properties();
        props.extend(self.extra_properties());
        props
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for registering a graphic card.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateGraphicCard {
    pub parent_id: Option<DbId>,
    #[validate(length(max = 64, message = "pid must be at most 64 characters"))]
    pub pid: Option<String>,
    #[validate(length(max = 64, message = "gid must be at most 64 characters"))]
    pub gid: Option<String>,
    #[validate(length(max = 128, message = "model must be at most 128 characters"))]
    pub model: Option<String>,
    #[validate(length(max = 64, message = "manufacturer must be at most 64 characters"))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 64, message = "serial_number must be at most 64 characters"))]
    pub serial_number: Option<String>,
    #[validate(range(min = 0.1, max = 3.0, message = "weight_kg must be between 0.1 and 3"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "width_m must be between 0.1 and 3"))]
    pub width_m: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "height_m must be between 0.1 and 3"))]
    pub height_m: Option<f64>,
    #[validate(range(min = 1, max = 10000, message = "memory_mb must be between 1 and 10000"))]
    pub memory_mb: Option<i16>,
}

/// DTO for registering a hard drive. The erasure/tests/benchmarks records
/// are accepted here and persisted, but never emitted on output.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateHardDrive {
    pub parent_id: Option<DbId>,
    #[validate(length(max = 64, message = "pid must be at most 64 characters"))]
    pub pid: Option<String>,
    #[validate(length(max = 64, message = "gid must be at most 64 characters"))]
    pub gid: Option<String>,
    #[validate(length(max = 128, message = "model must be at most 128 characters"))]
    pub model: Option<String>,
    #[validate(length(max = 64, message = "manufacturer must be at most 64 characters"))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 64, message = "serial_number must be at most 64 characters"))]
    pub serial_number: Option<String>,
    #[validate(range(min = 0.1, max = 3.0, message = "weight_kg must be between 0.1 and 3"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "width_m must be between 0.1 and 3"))]
    pub width_m: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "height_m must be between 0.1 and 3"))]
    pub height_m: Option<f64>,
    #[validate(range(
        min = 1,
        max = 100000000,
        message = "size_mb must be between 1 and 100000000"
    ))]
    pub size_mb: Option<i32>,
    pub erasure: Option<serde_json::Value>,
    pub tests: Option<serde_json::Value>,
    pub benchmarks: Option<serde_json::Value>,
}

/// DTO for registering a motherboard.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateMotherboard {
    pub parent_id: Option<DbId>,
    #[validate(length(max = 64, message = "pid must be at most 64 characters"))]
    pub pid: Option<String>,
    #[validate(length(max = 64, message = "gid must be at most 64 characters"))]
    pub gid: Option<String>,
    #[validate(length(max = 128, message = "model must be at most 128 characters"))]
    pub model: Option<String>,
    #[validate(length(max = 64, message = "manufacturer must be at most 64 characters"))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 64, message = "serial_number must be at most 64 characters"))]
    pub serial_number: Option<String>,
    #[validate(range(min = 0.1, max = 3.0, message = "weight_kg must be between 0.1 and 3"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "width_m must be between 0.1 and 3"))]
    pub width_m: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "height_m must be between 0.1 and 3"))]
    pub height_m: Option<f64>,
    #[validate(range(min = 1, max = 20, message = "slots must be between 1 and 20"))]
    pub slots: Option<i16>,
    #[validate(range(min = 0, max = 20, message = "usb must be between 0 and 20"))]
    pub usb: Option<i16>,
    #[validate(range(min = 0, max = 20, message = "firewire must be between 0 and 20"))]
    pub firewire: Option<i16>,
    #[validate(range(min = 0, max = 20, message = "serial must be between 0 and 20"))]
    pub serial: Option<i16>,
    #[validate(range(min = 0, max = 20, message = "pcmcia must be between 0 and 20"))]
    pub pcmcia: Option<i16>,
}

/// DTO for registering a network adapter.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateNetworkAdapter {
    pub parent_id: Option<DbId>,
    #[validate(length(max = 64, message = "pid must be at most 64 characters"))]
    pub pid: Option<String>,
    #[validate(length(max = 64, message = "gid must be at most 64 characters"))]
    pub gid: Option<String>,
    #[validate(length(max = 128, message = "model must be at most 128 characters"))]
    pub model: Option<String>,
    #[validate(length(max = 64, message = "manufacturer must be at most 64 characters"))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 64, message = "serial_number must be at most 64 characters"))]
    pub serial_number: Option<String>,
    #[validate(range(min = 0.1, max = 3.0, message = "weight_kg must be between 0.1 and 3"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "width_m must be between 0.1 and 3"))]
    pub width_m: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "height_m must be between 0.1 and 3"))]
    pub height_m: Option<f64>,
    #[validate(range(min = 10, max = 10000, message = "speed_mbps must be between 10 and 10000"))]
    pub speed_mbps: Option<i16>,
}

/// DTO for registering a RAM module.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateRamModule {
    pub parent_id: Option<DbId>,
    #[validate(length(max = 64, message = "pid must be at most 64 characters"))]
    pub pid: Option<String>,
    #[validate(length(max = 64, message = "gid must be at most 64 characters"))]
    pub gid: Option<String>,
    #[validate(length(max = 128, message = "model must be at most 128 characters"))]
    pub model: Option<String>,
    #[validate(length(max = 64, message = "manufacturer must be at most 64 characters"))]
    pub manufacturer: Option<String>,
    #[validate(length(max = 64, message = "serial_number must be at most 64 characters"))]
    pub serial_number: Option<String>,
    #[validate(range(min = 0.1, max = 3.0, message = "weight_kg must be between 0.1 and 3"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "width_m must be between 0.1 and 3"))]
    pub width_m: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "height_m must be between 0.1 and 3"))]
    pub height_m: Option<f64>,
    #[validate(range(min = 128, max = 17000, message = "size_mb must be between 128 and 17000"))]
    pub size_mb: Option<i16>,
    #[validate(range(min = 100.0, max = 10000.0, message = "speed_mhz must be between 100 and 10000"))]
    pub speed_mhz: Option<f64>,
}
