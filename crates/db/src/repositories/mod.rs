//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Writes that span the joined
//! hierarchy run in a transaction.

pub mod component_repo;
pub mod computer_repo;
pub mod device_repo;

pub use component_repo::ComponentRepo;
pub use computer_repo::ComputerRepo;
pub use device_repo::DeviceRepo;
