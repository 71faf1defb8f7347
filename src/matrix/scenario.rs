//! Scenario matrix file format
//!
//! A matrix is a JSON document listing scenarios:
//!
//! ```json
//! { "scenarios": [
//!     { "name": "add_i64_largest_pos_i32_4", "group": "addition", "op": "add",
//!       "operands": ["i64:9223372036854775807", "i32:4"], "assign": "i64",
//!       "expect": "i64:-9223372036854775805" },
//!     { "name": "div_by_zero", "group": "division", "op": "div",
//!       "operands": ["u32:1", "u32:0"], "expect": { "error": "divide_by_zero" } }
//! ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{ErrorKind, NumericType, Operator, TypedValue};

#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixFile {
    pub scenarios: Vec<Scenario>,
}

/// One operation applied to literal operands, with the expected outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Reporting group, e.g. "addition"
    #[serde(default)]
    pub group: String,
    pub op: Operator,
    pub operands: Vec<TypedValue>,
    /// Destination type the result is stored into, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assign: Option<NumericType>,
    pub expect: Expectation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expectation {
    Value(TypedValue),
    Error { error: ErrorKind },
}

impl Scenario {
    /// Render as source-like text, e.g. `i64 <- i64:1 + i32:4`
    pub fn describe(&self) -> String {
        let expr = match self.operands.as_slice() {
            [operand] => format!("{}{}", self.op.symbol(), operand),
            [left, right] => format!("{} {} {}", left, self.op.symbol(), right),
            operands => format!(
                "{}({})",
                self.op,
                operands.iter().map(|o| o.to_string()).collect::<Vec<_>>().join(", ")
            ),
        };
        match self.assign {
            Some(target) => format!("{target} <- {expr}"),
            None => expr,
        }
    }
}

/// Parse a matrix from JSON text
pub fn parse_matrix(json: &str) -> Result<MatrixFile, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read and parse a matrix file
pub fn load_matrix(path: &Path) -> Result<MatrixFile, MatrixError> {
    let content = fs::read_to_string(path).map_err(|source| MatrixError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_matrix(&content).map_err(|source| MatrixError::Json {
        path: path.to_path_buf(),
        source,
    })
}
