//! Domain layer for the device traceability backend.
//!
//! Pure logic only: the device taxonomy, hardware-ID derivation, unit-of-
//! measure codes, and the per-kind serialization field rules. Persistence
//! lives in `devicetrace-db`.

pub mod error;
pub mod kind;
pub mod naming;
pub mod schema;
pub mod types;
pub mod units;
