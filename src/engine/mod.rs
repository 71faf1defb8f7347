//! Integer arithmetic and bitwise semantics engine
//!
//! Evaluates the eight integer operators over typed 32/64-bit operands,
//! producing both the value and the type a code generator must lower the
//! result to. Every evaluation is a pure function of its inputs; the only
//! failures are division by zero, operand types with no valid result type,
//! and arity mismatches.

pub mod arith;
pub mod bitwise;
pub mod promotion;
pub mod types;
pub mod value;

pub use types::NumericType;
pub use value::TypedValue;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Operator tags accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Sub,
    Div,
    Mod,
    Shl,
    Shr,
    Neg,
    Not,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Add,
        Operator::Sub,
        Operator::Div,
        Operator::Mod,
        Operator::Shl,
        Operator::Shr,
        Operator::Neg,
        Operator::Not,
    ];

    /// Number of operands the operator takes
    pub fn arity(self) -> usize {
        match self {
            Operator::Neg | Operator::Not => 1,
            _ => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Sub => "sub",
            Operator::Div => "div",
            Operator::Mod => "mod",
            Operator::Shl => "shl",
            Operator::Shr => "shr",
            Operator::Neg => "neg",
            Operator::Not => "not",
        }
    }

    /// Source-level symbol, used when rendering expressions
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub | Operator::Neg => "-",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Shl => "<<",
            Operator::Shr => ">>",
            Operator::Not => "~",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("Unknown operator: {s}"))
    }
}

/// The value an operation produced, tagged with the operator that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationResult {
    pub value: TypedValue,
    pub kind: Operator,
}

impl OperationResult {
    /// Type the result must be lowered to
    pub fn typ(&self) -> NumericType {
        self.value.typ()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Division by zero: {op} on ({left}, {right})")]
    DivideByZero {
        op: Operator,
        left: NumericType,
        right: NumericType,
    },
    #[error("Unrepresentable operation: {op} on ({operands})")]
    UnrepresentableOperation { op: Operator, operands: String },
    #[error("Invalid conversion: {from} to {to}")]
    InvalidConversion { from: NumericType, to: NumericType },
    #[error("Arity mismatch: {op} takes {expected} operand(s), got {actual}")]
    ArityMismatch {
        op: Operator,
        expected: usize,
        actual: usize,
    },
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

/// Serializable tag for each [`EngineError`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DivideByZero,
    UnrepresentableOperation,
    InvalidConversion,
    ArityMismatch,
    InvalidLiteral,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::DivideByZero { .. } => ErrorKind::DivideByZero,
            EngineError::UnrepresentableOperation { .. } => ErrorKind::UnrepresentableOperation,
            EngineError::InvalidConversion { .. } => ErrorKind::InvalidConversion,
            EngineError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            EngineError::InvalidLiteral(_) => ErrorKind::InvalidLiteral,
        }
    }
}

/// Stateless dispatcher over the operator implementations.
///
/// Holds no data; a single instance can be shared freely between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArithmeticEngine;

impl ArithmeticEngine {
    pub fn new() -> Self {
        ArithmeticEngine
    }

    /// Result type of `op` over the given operand types, without evaluating anything.
    pub fn result_type(&self, op: Operator, operands: &[NumericType]) -> Result<NumericType, EngineError> {
        promotion::result_type(op, operands)
    }

    /// Evaluate `op` over one (unary) or two (binary) operands.
    pub fn evaluate(&self, op: Operator, operands: &[TypedValue]) -> Result<OperationResult, EngineError> {
        let value = match *operands {
            [operand] => self.evaluate_unary(op, operand)?,
            [left, right] => self.evaluate_binary(op, left, right)?,
            _ => {
                return Err(EngineError::ArityMismatch {
                    op,
                    expected: op.arity(),
                    actual: operands.len(),
                })
            }
        };
        debug!(%op, ?operands, result = %value, bits = %value.to_hex(), "evaluated");
        Ok(OperationResult { value, kind: op })
    }

    /// Evaluate and then store the result into `target` by implicit conversion.
    pub fn evaluate_into(
        &self,
        op: Operator,
        operands: &[TypedValue],
        target: NumericType,
    ) -> Result<OperationResult, EngineError> {
        let result = self.evaluate(op, operands)?;
        Ok(OperationResult {
            value: result.value.convert(target)?,
            kind: op,
        })
    }

    fn evaluate_binary(&self, op: Operator, left: TypedValue, right: TypedValue) -> Result<TypedValue, EngineError> {
        match op {
            Operator::Add => arith::add(left, right),
            Operator::Sub => arith::sub(left, right),
            Operator::Div => arith::div(left, right),
            Operator::Mod => arith::rem(left, right),
            Operator::Shl => bitwise::shl(left, right),
            Operator::Shr => bitwise::shr(left, right),
            Operator::Neg | Operator::Not => Err(EngineError::ArityMismatch {
                op,
                expected: 1,
                actual: 2,
            }),
        }
    }

    fn evaluate_unary(&self, op: Operator, operand: TypedValue) -> Result<TypedValue, EngineError> {
        match op {
            Operator::Neg => arith::neg(operand),
            Operator::Not => bitwise::not(operand),
            _ => Err(EngineError::ArityMismatch {
                op,
                expected: 2,
                actual: 1,
            }),
        }
    }
}
