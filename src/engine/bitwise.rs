//! Shifts and bitwise NOT
//!
//! Shift distances are always `i32` and masked to the width of the value being
//! shifted: `& 31` for 32-bit values, `& 63` for 64-bit values. Right shifts
//! are arithmetic on signed types and logical on unsigned ones.

use super::promotion::{binary_result_type, unary_result_type};
use super::{EngineError, Operator, TypedValue};

fn shift_distance(op: Operator, value: TypedValue, distance: TypedValue) -> Result<u32, EngineError> {
    let typ = binary_result_type(op, value.typ(), distance.typ())?;
    // Only the low bits count, so a negative distance masks like any other
    Ok(distance.bits() as u32 & typ.shift_mask())
}

/// shl: shift left, vacated low bits filled with zero
///
/// Identical for signed and unsigned types; the result's sign bit is whatever
/// lands there.
pub fn shl(value: TypedValue, distance: TypedValue) -> Result<TypedValue, EngineError> {
    let shift = shift_distance(Operator::Shl, value, distance)?;
    let result = match value {
        TypedValue::Int32(v) => TypedValue::Int32(v << shift),
        TypedValue::UInt32(v) => TypedValue::UInt32(v << shift),
        TypedValue::Int64(v) => TypedValue::Int64(v << shift),
        TypedValue::UInt64(v) => TypedValue::UInt64(v << shift),
    };
    Ok(result)
}

/// shr: arithmetic (sign-filling) on signed types, logical (zero-filling) on unsigned
pub fn shr(value: TypedValue, distance: TypedValue) -> Result<TypedValue, EngineError> {
    let shift = shift_distance(Operator::Shr, value, distance)?;
    let result = match value {
        TypedValue::Int32(v) => TypedValue::Int32(v >> shift),
        TypedValue::UInt32(v) => TypedValue::UInt32(v >> shift),
        TypedValue::Int64(v) => TypedValue::Int64(v >> shift),
        TypedValue::UInt64(v) => TypedValue::UInt64(v >> shift),
    };
    Ok(result)
}

/// not: flip exactly `width` bits of the operand's own type
///
/// The result keeps the operand's type. Widening it afterwards (see
/// [`TypedValue::convert`]) extends from the NOT result's sign bit, not the
/// input operand's.
pub fn not(operand: TypedValue) -> Result<TypedValue, EngineError> {
    let typ = unary_result_type(Operator::Not, operand.typ())?;
    Ok(TypedValue::from_bits(typ, !operand.bits()))
}
