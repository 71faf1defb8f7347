//! Result-type rules for every operator
//!
//! Every rule lives in a flat table that can be read and audited
//! independently of the arithmetic:
//! - [`ARITHMETIC_PROMOTIONS`]: `(left, right)` for Add, Sub, Div and Mod
//! - [`SHIFT_PROMOTIONS`]: `(value, distance)` for Shl and Shr
//! - [`UNARY_PROMOTIONS`]: `(operator, operand)` for Neg and Not
//!
//! A `None` result marks a combination with no valid result type.
//!
//! Arithmetic rules in short:
//! - same type: the result keeps it
//! - mixed width: the narrow operand is extended by its own signedness and the
//!   result takes the wide operand's type
//! - `i32` with `u32`: both widen to `i64`
//! - `i64` with `u64`: rejected, there is no wider type
//!
//! Shifts keep the type of the value being shifted and always take an `i32`
//! distance. `Neg` on `u32` produces `i64`; on `u64` it is rejected.

use super::types::NumericType::{self, *};
use super::{EngineError, Operator};

/// A `(left, right, result)` row of a binary table.
pub type BinaryRule = (NumericType, NumericType, Option<NumericType>);

/// An `(operator, operand, result)` row of the unary table.
pub type UnaryRule = (Operator, NumericType, Option<NumericType>);

/// `(left, right, result)` for Add, Sub, Div and Mod.
pub const ARITHMETIC_PROMOTIONS: [BinaryRule; 16] = [
    (Int32, Int32, Some(Int32)),
    (Int32, UInt32, Some(Int64)),
    (Int32, Int64, Some(Int64)),
    (Int32, UInt64, Some(UInt64)),
    (UInt32, Int32, Some(Int64)),
    (UInt32, UInt32, Some(UInt32)),
    (UInt32, Int64, Some(Int64)),
    (UInt32, UInt64, Some(UInt64)),
    (Int64, Int32, Some(Int64)),
    (Int64, UInt32, Some(Int64)),
    (Int64, Int64, Some(Int64)),
    (Int64, UInt64, None),
    (UInt64, Int32, Some(UInt64)),
    (UInt64, UInt32, Some(UInt64)),
    (UInt64, Int64, None),
    (UInt64, UInt64, Some(UInt64)),
];

/// `(value, distance, result)` for Shl and Shr. Only an `i32` distance is accepted.
pub const SHIFT_PROMOTIONS: [BinaryRule; 16] = [
    (Int32, Int32, Some(Int32)),
    (Int32, UInt32, None),
    (Int32, Int64, None),
    (Int32, UInt64, None),
    (UInt32, Int32, Some(UInt32)),
    (UInt32, UInt32, None),
    (UInt32, Int64, None),
    (UInt32, UInt64, None),
    (Int64, Int32, Some(Int64)),
    (Int64, UInt32, None),
    (Int64, Int64, None),
    (Int64, UInt64, None),
    (UInt64, Int32, Some(UInt64)),
    (UInt64, UInt32, None),
    (UInt64, Int64, None),
    (UInt64, UInt64, None),
];

/// `(operator, operand, result)` for Neg and Not.
pub const UNARY_PROMOTIONS: [UnaryRule; 8] = [
    (Operator::Neg, Int32, Some(Int32)),
    (Operator::Neg, UInt32, Some(Int64)),
    (Operator::Neg, Int64, Some(Int64)),
    (Operator::Neg, UInt64, None),
    (Operator::Not, Int32, Some(Int32)),
    (Operator::Not, UInt32, Some(UInt32)),
    (Operator::Not, Int64, Some(Int64)),
    (Operator::Not, UInt64, Some(UInt64)),
];

fn unrepresentable(op: Operator, operands: &[NumericType]) -> EngineError {
    EngineError::UnrepresentableOperation {
        op,
        operands: operands.iter().map(|t| t.name()).collect::<Vec<_>>().join(", "),
    }
}

fn lookup(table: &[BinaryRule], left: NumericType, right: NumericType) -> Option<NumericType> {
    table
        .iter()
        .find(|(l, r, _)| *l == left && *r == right)
        .and_then(|(_, _, result)| *result)
}

/// The binary table that governs `op`, None for unary operators.
pub fn binary_table(op: Operator) -> Option<&'static [BinaryRule]> {
    let table: &'static [BinaryRule] = match op {
        Operator::Add | Operator::Sub | Operator::Div | Operator::Mod => &ARITHMETIC_PROMOTIONS,
        Operator::Shl | Operator::Shr => &SHIFT_PROMOTIONS,
        Operator::Neg | Operator::Not => return None,
    };
    Some(table)
}

/// Look up the promoted type for an arithmetic pair, None if the pair has no common type.
pub fn arithmetic_promotion(left: NumericType, right: NumericType) -> Option<NumericType> {
    lookup(&ARITHMETIC_PROMOTIONS, left, right)
}

/// Result type of a binary operator applied to `left` and `right`.
pub fn binary_result_type(
    op: Operator,
    left: NumericType,
    right: NumericType,
) -> Result<NumericType, EngineError> {
    let table = binary_table(op).ok_or(EngineError::ArityMismatch {
        op,
        expected: 1,
        actual: 2,
    })?;
    lookup(table, left, right).ok_or_else(|| unrepresentable(op, &[left, right]))
}

/// Result type of a unary operator applied to `operand`.
pub fn unary_result_type(op: Operator, operand: NumericType) -> Result<NumericType, EngineError> {
    if op.arity() != 1 {
        return Err(EngineError::ArityMismatch {
            op,
            expected: 2,
            actual: 1,
        });
    }
    UNARY_PROMOTIONS
        .iter()
        .find(|(o, t, _)| *o == op && *t == operand)
        .and_then(|(_, _, result)| *result)
        .ok_or_else(|| unrepresentable(op, &[operand]))
}

/// Result type for any operator and operand list.
pub fn result_type(op: Operator, operands: &[NumericType]) -> Result<NumericType, EngineError> {
    match *operands {
        [operand] => unary_result_type(op, operand),
        [left, right] => binary_result_type(op, left, right),
        _ => Err(EngineError::ArityMismatch {
            op,
            expected: op.arity(),
            actual: operands.len(),
        }),
    }
}
