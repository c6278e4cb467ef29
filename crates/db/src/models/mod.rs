//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching database rows
//! - `Deserialize`-only create/update DTOs with validator range rules
//!
//! DTOs use `deny_unknown_fields` so identity and timestamp fields can never
//! be supplied by callers.

pub mod component;
pub mod computer;
pub mod device;
