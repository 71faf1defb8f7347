//! Scalar integer types understood by the engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four integer types an operand can carry.
///
/// The type fixes both the width of the bit pattern and how that pattern is
/// interpreted (two's complement or plain binary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericType {
    #[serde(rename = "i32")]
    Int32,
    #[serde(rename = "u32")]
    UInt32,
    #[serde(rename = "i64")]
    Int64,
    #[serde(rename = "u64")]
    UInt64,
}

impl NumericType {
    /// All four types, narrow before wide, signed before unsigned.
    pub const ALL: [NumericType; 4] = [
        NumericType::Int32,
        NumericType::UInt32,
        NumericType::Int64,
        NumericType::UInt64,
    ];

    /// Width in bits (32 or 64)
    pub fn width(self) -> u32 {
        match self {
            NumericType::Int32 | NumericType::UInt32 => 32,
            NumericType::Int64 | NumericType::UInt64 => 64,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, NumericType::Int32 | NumericType::Int64)
    }

    /// Mask covering exactly `width` low bits
    pub fn mask(self) -> u64 {
        match self.width() {
            32 => u64::from(u32::MAX),
            _ => u64::MAX,
        }
    }

    /// Mask applied to a shift distance: 5 bits for 32-bit values, 6 for 64-bit.
    pub fn shift_mask(self) -> u32 {
        self.width() - 1
    }

    /// Short textual name as used in literals (`i32`, `u64`, ...)
    pub fn name(self) -> &'static str {
        match self {
            NumericType::Int32 => "i32",
            NumericType::UInt32 => "u32",
            NumericType::Int64 => "i64",
            NumericType::UInt64 => "u64",
        }
    }

    /// Parse a textual type name, returning None for anything unknown
    pub fn from_name(name: &str) -> Option<NumericType> {
        match name {
            "i32" => Some(NumericType::Int32),
            "u32" => Some(NumericType::UInt32),
            "i64" => Some(NumericType::Int64),
            "u64" => Some(NumericType::UInt64),
            _ => None,
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for NumericType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericType::from_name(s).ok_or_else(|| format!("Unknown numeric type: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_and_sign() {
        assert_eq!(NumericType::Int32.width(), 32);
        assert_eq!(NumericType::UInt32.width(), 32);
        assert_eq!(NumericType::Int64.width(), 64);
        assert_eq!(NumericType::UInt64.width(), 64);

        assert!(NumericType::Int32.is_signed());
        assert!(!NumericType::UInt32.is_signed());
        assert!(NumericType::Int64.is_signed());
        assert!(!NumericType::UInt64.is_signed());
    }

    #[test]
    fn test_masks() {
        assert_eq!(NumericType::UInt32.mask(), 0xFFFF_FFFF);
        assert_eq!(NumericType::Int64.mask(), u64::MAX);
        assert_eq!(NumericType::Int32.shift_mask(), 31);
        assert_eq!(NumericType::UInt64.shift_mask(), 63);
    }

    #[test]
    fn test_names() {
        for typ in NumericType::ALL {
            assert_eq!(typ.name().parse::<NumericType>().unwrap(), typ);
            assert_eq!(format!("{typ}"), typ.name());
        }
        assert!("i16".parse::<NumericType>().is_err());
        assert_eq!(NumericType::from_name("f32"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&NumericType::UInt32).unwrap();
        assert_eq!(json, "\"u32\"");
        let typ: NumericType = serde_json::from_str("\"i64\"").unwrap();
        assert_eq!(typ, NumericType::Int64);
    }
}
