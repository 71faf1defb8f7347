//! Integer arithmetic and bitwise semantics for a freestanding code generator.
//!
//! intlower computes the exact result, and the exact result type, of the
//! integer operators a compiler backend lowers for 32 and 64-bit signed and
//! unsigned operands: two's-complement wraparound, mixed-width promotion,
//! truncating division and shift-distance masking.
//!
//! # Modules
//!
//! - [`engine`] -- The [`engine::ArithmeticEngine`], typed values and the promotion table.
//! - [`matrix`] -- Runner for JSON scenario matrices that check a backend operation by operation.
//! - [`cli`] -- The `intlower` command-line front end.
//!
//! # Example
//!
//! Add a 32-bit operand to a 64-bit one and observe the wraparound:
//!
//! ```
//! use intlower::engine::{ArithmeticEngine, NumericType, Operator, TypedValue};
//!
//! let engine = ArithmeticEngine::new();
//! let result = engine
//!     .evaluate(Operator::Add, &[TypedValue::Int64(i64::MAX), TypedValue::Int32(4)])
//!     .unwrap();
//! assert_eq!(result.value, TypedValue::Int64(-9223372036854775805));
//! assert_eq!(result.typ(), NumericType::Int64);
//!
//! // NOT runs at the operand's width; storing into i64 extends from the result's sign
//! let result = engine
//!     .evaluate_into(Operator::Not, &[TypedValue::Int32(1000000000)], NumericType::Int64)
//!     .unwrap();
//! assert_eq!(result.value, TypedValue::Int64(-1000000001));
//! ```

pub mod cli;
pub mod engine;
pub mod matrix;
