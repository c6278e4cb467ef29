//! Computer DTOs and response shapes.
//!
//! Concrete computer variants (Desktop, Laptop, Netbook, Server, Microtower)
//! are pure tags: a computer is a base device row plus a `computers` subtype
//! row and zero or more owned components.

use serde::{Deserialize, Serialize};
use validator::Validate;

use devicetrace_core::kind::ComputerKind;
use devicetrace_core::types::DbId;

use crate::models::device::Device;

/// DTO for registering a new computer.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateComputer {
    pub kind: ComputerKind,
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
}

/// A computer with id-only references to the components it owns.
#[derive(Debug, Clone, Serialize)]
pub struct ComputerWithComponents {
    #[serde(flatten)]
    pub device: Device,
    pub url: String,
    pub components: Vec<DbId>,
}
