//! Device taxonomy.
//!
//! The hierarchy Device -> Computer/Component -> concrete kind is expressed
//! as a tagged union. `DeviceKind::as_str` produces the discriminator stored
//! in the `devices.kind` column; `from_str` parses it back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Concrete computer variants. Pure tags, no extra attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputerKind {
    Desktop,
    Laptop,
    Netbook,
    Server,
    Microtower,
}

impl ComputerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Laptop => "Laptop",
            Self::Netbook => "Netbook",
            Self::Server => "Server",
            Self::Microtower => "Microtower",
        }
    }
}

/// Concrete component variants. Each maps to a joined detail table holding
/// its extra physical attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    GraphicCard,
    HardDrive,
    Motherboard,
    NetworkAdapter,
    RamModule,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GraphicCard => "GraphicCard",
            Self::HardDrive => "HardDrive",
            Self::Motherboard => "Motherboard",
            Self::NetworkAdapter => "NetworkAdapter",
            Self::RamModule => "RamModule",
        }
    }

    /// Name of the joined subtype table.
    pub fn detail_table(&self) -> &'static str {
        match self {
            Self::GraphicCard => "graphic_cards",
            Self::HardDrive => "hard_drives",
            Self::Motherboard => "motherboards",
            Self::NetworkAdapter => "network_adapters",
            Self::RamModule => "ram_modules",
        }
    }

    /// Columns of the subtype table beyond the shared `id`.
    pub fn detail_columns(&self) -> &'static [&'static str] {
        match self {
            Self::GraphicCard => &["memory_mb"],
            Self::HardDrive => &["size_mb", "erasure", "tests", "benchmarks"],
            Self::Motherboard => &["slots", "usb", "firewire", "serial", "pcmcia"],
            Self::NetworkAdapter => &["speed_mbps"],
            Self::RamModule => &["size_mb", "speed_mhz"],
        }
    }
}

/// Any concrete device kind; the value of the `devices.kind` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Computer(ComputerKind),
    Component(ComponentKind),
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Computer(k) => k.as_str(),
            Self::Component(k) => k.as_str(),
        }
    }

    /// Parse a discriminator string, rejecting unknown kinds.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "Desktop" => Ok(Self::Computer(ComputerKind::Desktop)),
            "Laptop" => Ok(Self::Computer(ComputerKind::Laptop)),
            "Netbook" => Ok(Self::Computer(ComputerKind::Netbook)),
            "Server" => Ok(Self::Computer(ComputerKind::Server)),
            "Microtower" => Ok(Self::Computer(ComputerKind::Microtower)),
            "GraphicCard" => Ok(Self::Component(ComponentKind::GraphicCard)),
            "HardDrive" => Ok(Self::Component(ComponentKind::HardDrive)),
            "Motherboard" => Ok(Self::Component(ComponentKind::Motherboard)),
            "NetworkAdapter" => Ok(Self::Component(ComponentKind::NetworkAdapter)),
            "RamModule" => Ok(Self::Component(ComponentKind::RamModule)),
            other => Err(CoreError::Validation(format!(
                "Unknown device kind: '{other}'"
            ))),
        }
    }

    pub fn is_computer(&self) -> bool {
        matches!(self, Self::Computer(_))
    }

    pub fn is_component(&self) -> bool {
        matches!(self, Self::Component(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminator_round_trip() {
        for kind in [
            DeviceKind::Computer(ComputerKind::Desktop),
            DeviceKind::Computer(ComputerKind::Microtower),
            DeviceKind::Component(ComponentKind::GraphicCard),
            DeviceKind::Component(ComponentKind::RamModule),
        ] {
            assert_eq!(DeviceKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!(DeviceKind::from_str("Toaster").is_err());
        assert!(DeviceKind::from_str("").is_err());
    }

    #[test]
    fn classification() {
        assert!(DeviceKind::Computer(ComputerKind::Laptop).is_computer());
        assert!(!DeviceKind::Computer(ComputerKind::Laptop).is_component());
        assert!(DeviceKind::Component(ComponentKind::HardDrive).is_component());
    }

    #[test]
    fn detail_tables_cover_all_components() {
        for kind in [
            ComponentKind::GraphicCard,
            ComponentKind::HardDrive,
            ComponentKind::Motherboard,
            ComponentKind::NetworkAdapter,
            ComponentKind::RamModule,
        ] {
            assert!(!kind.detail_table().is_empty());
            assert!(!kind.detail_columns().is_empty());
        }
    }
}
