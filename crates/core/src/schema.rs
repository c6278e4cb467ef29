//! Serialization field rules.
//!
//! One explicit mapping table per device kind instead of a schema class
//! hierarchy: each rule says whether the field is accepted on input, emitted
//! on output, which unit of measure documents it, and the inclusive bounds
//! its value must satisfy.

use crate::kind::{ComponentKind, DeviceKind};
use crate::units::UnitCode;

/// Serialization rule for a single field of a device representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub field: &'static str,
    /// Accepted on input.
    pub writable: bool,
    /// Emitted on output.
    pub readable: bool,
    pub unit: Option<UnitCode>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FieldRule {
    const fn read_only(field: &'static str) -> Self {
        Self {
            field,
            writable: false,
            readable: true,
            unit: None,
            min: None,
            max: None,
        }
    }

    const fn text(field: &'static str) -> Self {
        Self {
            field,
            writable: true,
            readable: true,
            unit: None,
            min: None,
            max: None,
        }
    }

    const fn measured(field: &'static str, unit: UnitCode, min: f64, max: f64) -> Self {
        Self {
            field,
            writable: true,
            readable: true,
            unit: Some(unit),
            min: Some(min),
            max: Some(max),
        }
    }

    const fn counted(field: &'static str, min: f64, max: f64) -> Self {
        Self {
            field,
            writable: true,
            readable: true,
            unit: None,
            min: Some(min),
            max: Some(max),
        }
    }

    /// Accepted on input, never emitted (nested records routed elsewhere).
    const fn write_only(field: &'static str) -> Self {
        Self {
            field,
            writable: true,
            readable: false,
            unit: None,
            min: None,
            max: None,
        }
    }
}

/// Rules for the base record shared by every device kind.
pub const DEVICE_FIELDS: &[FieldRule] = &[
    FieldRule::read_only("id"),
    FieldRule::text("kind"),
    FieldRule::read_only("hid"),
    FieldRule::text("pid"),
    FieldRule::text("gid"),
    FieldRule::text("model"),
    FieldRule::text("manufacturer"),
    FieldRule::text("serial_number"),
    FieldRule::measured("weight_kg", UnitCode::Kgm, 0.1, 3.0),
    FieldRule::measured("width_m", UnitCode::M, 0.1, 3.0),
    FieldRule::measured("height_m", UnitCode::M, 0.1, 3.0),
    FieldRule::read_only("url"),
    FieldRule::read_only("created_at"),
    FieldRule::read_only("updated_at"),
];

const COMPUTER_FIELDS: &[FieldRule] = &[FieldRule::read_only("components")];

const COMPONENT_FIELDS: &[FieldRule] = &[FieldRule::text("parent_id")];

const GRAPHIC_CARD_FIELDS: &[FieldRule] = &[FieldRule::measured(
    "memory_mb",
    UnitCode::MByte,
    1.0,
    10_000.0,
)];

const HARD_DRIVE_FIELDS: &[FieldRule] = &[
    FieldRule::measured("size_mb", UnitCode::MByte, 1.0, 100_000_000.0),
    FieldRule::write_only("erasure"),
    FieldRule::write_only("tests"),
    FieldRule::write_only("benchmarks"),
];

const MOTHERBOARD_FIELDS: &[FieldRule] = &[
    FieldRule::counted("slots", 1.0, 20.0),
    FieldRule::counted("usb", 0.0, 20.0),
    FieldRule::counted("firewire", 0.0, 20.0),
    FieldRule::counted("serial", 0.0, 20.0),
    FieldRule::counted("pcmcia", 0.0, 20.0),
];

const NETWORK_ADAPTER_FIELDS: &[FieldRule] = &[FieldRule::measured(
    "speed_mbps",
    UnitCode::Mbps,
    10.0,
    10_000.0,
)];

const RAM_MODULE_FIELDS: &[FieldRule] = &[
    FieldRule::measured("size_mb", UnitCode::MByte, 128.0, 17_000.0),
    FieldRule::measured("speed_mhz", UnitCode::Mhz, 100.0, 10_000.0),
];

/// Rules a kind adds on top of [`DEVICE_FIELDS`].
pub fn extra_field_rules(kind: DeviceKind) -> &'static [FieldRule] {
    match kind {
        DeviceKind::Computer(_) => COMPUTER_FIELDS,
        DeviceKind::Component(component) => match component {
            ComponentKind::GraphicCard => GRAPHIC_CARD_FIELDS,
            ComponentKind::HardDrive => HARD_DRIVE_FIELDS,
            ComponentKind::Motherboard => MOTHERBOARD_FIELDS,
            ComponentKind::NetworkAdapter => NETWORK_ADAPTER_FIELDS,
            ComponentKind::RamModule => RAM_MODULE_FIELDS,
        },
    }
}

/// Full rule set for a kind: shared base record first, then its own fields.
/// Components additionally carry the parent reference.
pub fn field_rules(kind: DeviceKind) -> Vec<&'static FieldRule> {
    let mut rules: Vec<&'static FieldRule> = DEVICE_FIELDS.iter().collect();
    if kind.is_component() {
        rules.extend(COMPONENT_FIELDS.iter());
    }
    rules.extend(extra_field_rules(kind).iter());
    rules
}
