//! Integer arithmetic: add, sub, div, mod, neg
//!
//! Operands are first brought to their promoted type (see [`super::promotion`]),
//! then the operation runs once over the full promoted width. Add, Sub and Neg
//! are computed on the raw bit pattern, which makes them identical for signed
//! and unsigned types and carries/borrows across all 64 bits in one step.
//! Division needs the signed interpretation and dispatches on the type.

use super::promotion::{binary_result_type, unary_result_type};
use super::types::NumericType;
use super::{EngineError, Operator, TypedValue};

/// Resize both operands to the promoted type of `op`.
pub fn promote(
    op: Operator,
    left: TypedValue,
    right: TypedValue,
) -> Result<(NumericType, TypedValue, TypedValue), EngineError> {
    let typ = binary_result_type(op, left.typ(), right.typ())?;
    Ok((typ, left.resize(typ), right.resize(typ)))
}

/// add: `left + right` modulo 2^width
pub fn add(left: TypedValue, right: TypedValue) -> Result<TypedValue, EngineError> {
    let (typ, a, b) = promote(Operator::Add, left, right)?;
    Ok(TypedValue::from_bits(typ, a.bits().wrapping_add(b.bits())))
}

/// sub: `left - right` modulo 2^width
pub fn sub(left: TypedValue, right: TypedValue) -> Result<TypedValue, EngineError> {
    let (typ, a, b) = promote(Operator::Sub, left, right)?;
    Ok(TypedValue::from_bits(typ, a.bits().wrapping_sub(b.bits())))
}

/// div: quotient truncated toward zero for signed types
///
/// `MIN / -1` wraps back to `MIN`.
pub fn div(left: TypedValue, right: TypedValue) -> Result<TypedValue, EngineError> {
    divide(Operator::Div, left, right)
}

/// mod: remainder of the truncating division, so `a == (a / b) * b + a % b`
///
/// The sign follows the dividend. `MIN % -1` is 0.
pub fn rem(left: TypedValue, right: TypedValue) -> Result<TypedValue, EngineError> {
    divide(Operator::Mod, left, right)
}

fn divide(op: Operator, left: TypedValue, right: TypedValue) -> Result<TypedValue, EngineError> {
    let (typ, a, b) = promote(op, left, right)?;
    if b.is_zero() {
        return Err(EngineError::DivideByZero {
            op,
            left: left.typ(),
            right: right.typ(),
        });
    }
    let quotient = op == Operator::Div;
    let (a, b) = (a.bits(), b.bits());
    let result = match typ {
        NumericType::Int32 => {
            let (a, b) = (a as u32 as i32, b as u32 as i32);
            TypedValue::Int32(if quotient { a.wrapping_div(b) } else { a.wrapping_rem(b) })
        }
        NumericType::UInt32 => {
            let (a, b) = (a as u32, b as u32);
            TypedValue::UInt32(if quotient { a / b } else { a % b })
        }
        NumericType::Int64 => {
            let (a, b) = (a as i64, b as i64);
            TypedValue::Int64(if quotient { a.wrapping_div(b) } else { a.wrapping_rem(b) })
        }
        NumericType::UInt64 => TypedValue::UInt64(if quotient { a / b } else { a % b }),
    };
    Ok(result)
}

/// neg: `0 - operand` in the negation's result type
///
/// A `u32` operand is zero-extended to `i64` first. `u64` has no signed
/// counterpart wide enough and is rejected. The minimum signed value negates
/// to itself.
pub fn neg(operand: TypedValue) -> Result<TypedValue, EngineError> {
    let typ = unary_result_type(Operator::Neg, operand.typ())?;
    let value = operand.resize(typ);
    Ok(TypedValue::from_bits(typ, 0u64.wrapping_sub(value.bits())))
}
