//! Typed integer values

use std::convert::TryFrom;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use super::types::NumericType;
use super::EngineError;

/// A fixed-width bit pattern tagged with its [`NumericType`].
///
/// Each variant holds a container of exactly the type's width, so there are no
/// high bits to keep clean. All interpretation (sign extension, arithmetic vs.
/// logical shift) is dispatched on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypedValue {
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
}

impl TypedValue {
    /// Get the numeric type of this value
    pub fn typ(&self) -> NumericType {
        match self {
            TypedValue::Int32(_) => NumericType::Int32,
            TypedValue::UInt32(_) => NumericType::UInt32,
            TypedValue::Int64(_) => NumericType::Int64,
            TypedValue::UInt64(_) => NumericType::UInt64,
        }
    }

    /// Build a value of type `typ` from the low `typ.width()` bits of `bits`.
    pub fn from_bits(typ: NumericType, bits: u64) -> TypedValue {
        match typ {
            NumericType::Int32 => TypedValue::Int32(bits as u32 as i32),
            NumericType::UInt32 => TypedValue::UInt32(bits as u32),
            NumericType::Int64 => TypedValue::Int64(bits as i64),
            NumericType::UInt64 => TypedValue::UInt64(bits),
        }
    }

    /// The raw bit pattern in the low `width` bits; higher bits are zero.
    pub fn bits(&self) -> u64 {
        match *self {
            TypedValue::Int32(v) => u64::from(v as u32),
            TypedValue::UInt32(v) => u64::from(v),
            TypedValue::Int64(v) => v as u64,
            TypedValue::UInt64(v) => v,
        }
    }

    /// The bit pattern extended to 64 bits according to this value's own
    /// signedness: sign extension for signed types, zero extension otherwise.
    pub fn extend_to_64(&self) -> u64 {
        match *self {
            TypedValue::Int32(v) => i64::from(v) as u64,
            TypedValue::UInt32(v) => u64::from(v),
            TypedValue::Int64(v) => v as u64,
            TypedValue::UInt64(v) => v,
        }
    }

    /// Re-type this value as `target`: extend by own signedness, then keep the
    /// low `target.width()` bits. Used to bring operands to a promoted type.
    pub fn resize(&self, target: NumericType) -> TypedValue {
        TypedValue::from_bits(target, self.extend_to_64())
    }

    /// Implicit conversion into a destination type.
    ///
    /// Only value-preserving widenings are allowed: `i32 -> i64`, `u32 -> i64`
    /// and `u32 -> u64`. The extension follows the source's signedness.
    pub fn convert(&self, target: NumericType) -> Result<TypedValue, EngineError> {
        use NumericType::*;
        match (self.typ(), target) {
            (from, to) if from == to => Ok(*self),
            (Int32, Int64) | (UInt32, Int64) | (UInt32, UInt64) => Ok(self.resize(target)),
            (from, to) => Err(EngineError::InvalidConversion { from, to }),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.bits() == 0
    }

    /// True if the value is signed and its sign bit is set
    pub fn is_negative(&self) -> bool {
        match *self {
            TypedValue::Int32(v) => v < 0,
            TypedValue::Int64(v) => v < 0,
            TypedValue::UInt32(_) | TypedValue::UInt64(_) => false,
        }
    }

    /// Create from a type string and value string.
    ///
    /// The value may be decimal (with a leading `-` for signed types) or a
    /// `0x` bit pattern no wider than the type. Decimal values must be in the
    /// type's range.
    pub fn from_strings(typ: &str, value: &str) -> Result<Self, EngineError> {
        let typ = NumericType::from_name(typ)
            .ok_or_else(|| EngineError::InvalidLiteral(format!("unknown type in {typ}:{value}")))?;
        let invalid = |reason: &str| EngineError::InvalidLiteral(format!("{typ}:{value}: {reason}"));

        if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
            let bits = u64::from_str_radix(&hex.replace('_', ""), 16).map_err(|e| invalid(&e.to_string()))?;
            if bits & !typ.mask() != 0 {
                return Err(invalid("bit pattern wider than type"));
            }
            return Ok(TypedValue::from_bits(typ, bits));
        }

        let digits = value.replace('_', "");
        let parsed = match typ {
            NumericType::Int32 => digits.parse::<i32>().map(TypedValue::Int32),
            NumericType::UInt32 => digits.parse::<u32>().map(TypedValue::UInt32),
            NumericType::Int64 => digits.parse::<i64>().map(TypedValue::Int64),
            NumericType::UInt64 => digits.parse::<u64>().map(TypedValue::UInt64),
        };
        parsed.map_err(|e| invalid(&e.to_string()))
    }

    /// Convert to type and value strings, value in decimal as interpreted by the type
    pub fn to_strings(&self) -> (String, String) {
        let value = match self {
            TypedValue::Int32(v) => v.to_string(),
            TypedValue::UInt32(v) => v.to_string(),
            TypedValue::Int64(v) => v.to_string(),
            TypedValue::UInt64(v) => v.to_string(),
        };
        (self.typ().name().to_string(), value)
    }

    /// Fixed-width hex rendering of the bit pattern, e.g. `0xfffffffb`
    pub fn to_hex(&self) -> String {
        let digits = match *self {
            TypedValue::Int32(v) => hex::encode(v.to_be_bytes()),
            TypedValue::UInt32(v) => hex::encode(v.to_be_bytes()),
            TypedValue::Int64(v) => hex::encode(v.to_be_bytes()),
            TypedValue::UInt64(v) => hex::encode(v.to_be_bytes()),
        };
        format!("0x{digits}")
    }

    /// Write the bit pattern as a little-endian immediate of the value's own width
    pub fn write_immediate<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match *self {
            TypedValue::Int32(v) => out.write_i32::<LittleEndian>(v),
            TypedValue::UInt32(v) => out.write_u32::<LittleEndian>(v),
            TypedValue::Int64(v) => out.write_i64::<LittleEndian>(v),
            TypedValue::UInt64(v) => out.write_u64::<LittleEndian>(v),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (typ, value) = self.to_strings();
        write!(f, "{typ}:{value}")
    }
}

impl FromStr for TypedValue {
    type Err = EngineError;

    /// Parse a `type:value` literal such as `i64:-4` or `u32:0xffffffff`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (typ, value) = s
            .split_once(':')
            .ok_or_else(|| EngineError::InvalidLiteral(format!("expected type:value, got {s}")))?;
        TypedValue::from_strings(typ.trim(), value.trim())
    }
}

impl TryFrom<String> for TypedValue {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TypedValue> for String {
    fn from(value: TypedValue) -> String {
        value.to_string()
    }
}
