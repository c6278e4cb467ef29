//! UN/CEFACT unit-of-measure codes.
//!
//! Numeric physical fields carry one of these codes as documentation for API
//! clients. They are metadata only, never enforced at runtime.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitCode {
    /// Megabyte ("4L").
    #[serde(rename = "4L")]
    MByte,
    /// Megabit per second ("E20").
    #[serde(rename = "E20")]
    Mbps,
    /// Megahertz ("MHZ").
    #[serde(rename = "MHZ")]
    Mhz,
    /// Gigabyte ("E34").
    #[serde(rename = "E34")]
    GByte,
    /// Gigahertz ("A86").
    #[serde(rename = "A86")]
    Ghz,
    /// Bit ("A99").
    #[serde(rename = "A99")]
    Bit,
    /// Kilogram ("KGM").
    #[serde(rename = "KGM")]
    Kgm,
    /// Metre ("MTR").
    #[serde(rename = "MTR")]
    M,
}

impl UnitCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MByte => "4L",
            Self::Mbps => "E20",
            Self::Mhz => "MHZ",
            Self::GByte => "E34",
            Self::Ghz => "A86",
            Self::Bit => "A99",
            Self::Kgm => "KGM",
            Self::M => "MTR",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code {
            "4L" => Ok(Self::MByte),
            "E20" => Ok(Self::Mbps),
            "MHZ" => Ok(Self::Mhz),
            "E34" => Ok(Self::GByte),
            "A86" => Ok(Self::Ghz),
            "A99" => Ok(Self::Bit),
            "KGM" => Ok(Self::Kgm),
            "MTR" => Ok(Self::M),
            other => Err(CoreError::Validation(format!(
                "Unknown unit code: '{other}'"
            ))),
        }
    }
}
