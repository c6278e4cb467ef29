//! Base device entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use devicetrace_core::types::{DbId, Timestamp};

/// A value of a physical property, carried for similarity matching and
/// dynamic query binding.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Text(String),
    Int(i64),
    Real(f64),
}

/// A row from the `devices` table: the record shared by every device kind.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    /// Discriminator, e.g. "Desktop" or "RamModule".
    pub kind: String,
    /// Hardware ID derived from (manufacturer, serial_number, model).
    /// Globally unique when present.
    pub hid: Option<String>,
    /// Platform/circuit identifier.
    pub pid: Option<String>,
    /// Giver (donor, seller) inventory identifier.
    pub gid: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
    pub weight_kg: Option<f64>,
    pub width_m: Option<f64>,
    pub height_m: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Device {
    /// Resource URL for assembled API responses.
    pub fn url(&self) -> String {
        format!("/devices/{}", self.id)
    }

    /// The base columns that describe the device physically: everything
    /// except identity (id, kind, hid), foreign keys, and timestamps.
    /// Used downstream for structural similarity matching.
    pub fn physical_properties(&self) -> Vec<(&'static str, Option<PropValue>)> {
        vec![
            ("pid", self.pid.clone().map(PropValue::Text)),
            ("gid", self.gid.clone().map(PropValue::Text)),
            ("model", self.model.clone().map(PropValue::Text)),
            ("manufacturer", self.manufacturer.clone().map(PropValue::Text)),
            (
                "serial_number",
                self.serial_number.clone().map(PropValue::Text),
            ),
            ("weight_kg", self.weight_kg.map(PropValue::Real)),
            ("width_m", self.width_m.map(PropValue::Real)),
            ("height_m", self.height_m.map(PropValue::Real)),
        ]
    }
}

/// DTO for patching the mutable base fields of a device.
///
/// Identity fields (model, manufacturer, serial number) are fixed at
/// creation because the hardware ID is derived from them.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateDevice {
    #[validate(length(max = 64, message = "pid must be at most 64 characters"))]
    pub pid: Option<String>,
    #[validate(length(max = 64, message = "gid must be at most 64 characters"))]
    pub gid: Option<String>,
    #[validate(range(min = 0.1, max = 3.0, message = "weight_kg must be between 0.1 and 3"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "width_m must be between 0.1 and 3"))]
    pub width_m: Option<f64>,
    #[validate(range(min = 0.1, max = 3.0, message = "height_m must be between 0.1 and 3"))]
    pub height_m: Option<f64>,
}
