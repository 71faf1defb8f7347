//! Command-line front end
//!
//! Kept in the library so the commands can be driven with any writer.

use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::engine::promotion::{BinaryRule, ARITHMETIC_PROMOTIONS, SHIFT_PROMOTIONS, UNARY_PROMOTIONS};
use crate::engine::{ArithmeticEngine, EngineError, NumericType, Operator, TypedValue};
use crate::matrix::{load_matrix, run_matrix, MatrixError, MatrixReport};

pub const USAGE: &str = "\
Usage:
  intlower run <matrix.json>...                      Run scenario matrices
  intlower eval <op> <type:value>... [--into <type>] [--bytes]
                                                     Evaluate one operation
  intlower table                                     Print the promotion tables

Operators: add sub div mod shl shr neg not
Types:     i32 u32 i64 u64";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Run the command in `args` (including the program name at index 0).
///
/// Returns `Ok(false)` when the command ran but reported failures.
pub fn run<W: Write>(args: &[String], out: &mut W) -> Result<bool, CliError> {
    let command = args
        .get(1)
        .ok_or_else(|| CliError::Usage("missing command".to_string()))?;
    let rest = &args[2..];
    match command.as_str() {
        "run" => run_command(rest, out),
        "eval" => eval_command(rest, out),
        "table" => table_command(out),
        "-h" | "--help" | "help" => {
            writeln!(out, "{USAGE}")?;
            Ok(true)
        }
        other => Err(CliError::Usage(format!("unknown command: {other}"))),
    }
}

fn run_command<W: Write>(files: &[String], out: &mut W) -> Result<bool, CliError> {
    if files.is_empty() {
        return Err(CliError::Usage("run needs at least one matrix file".to_string()));
    }
    let engine = ArithmeticEngine::new();
    let mut report = MatrixReport::default();
    for file in files {
        info!("running {file}");
        let matrix = load_matrix(Path::new(file))?;
        report.merge(run_matrix(&engine, &matrix));
    }
    writeln!(out, "{report}")?;
    Ok(report.is_success())
}

fn eval_command<W: Write>(args: &[String], out: &mut W) -> Result<bool, CliError> {
    let (op, rest) = args
        .split_first()
        .ok_or_else(|| CliError::Usage("eval needs an operator".to_string()))?;
    let op: Operator = op.parse().map_err(CliError::Usage)?;

    let mut operands = Vec::new();
    let mut into = None;
    let mut bytes = false;
    let mut i = 0;
    while i < rest.len() {
        if rest[i] == "--bytes" {
            bytes = true;
            i += 1;
        } else if rest[i] == "--into" {
            let typ = rest
                .get(i + 1)
                .ok_or_else(|| CliError::Usage("--into needs a type".to_string()))?;
            into = Some(typ.parse::<NumericType>().map_err(CliError::Usage)?);
            i += 2;
        } else {
            operands.push(rest[i].parse::<TypedValue>()?);
            i += 1;
        }
    }

    let engine = ArithmeticEngine::new();
    let result = match into {
        Some(target) => engine.evaluate_into(op, &operands, target)?,
        None => engine.evaluate(op, &operands)?,
    };
    writeln!(out, "{} ({})", result.value, result.value.to_hex())?;
    if bytes {
        let mut immediate = Vec::new();
        result.value.write_immediate(&mut immediate)?;
        writeln!(out, "immediate: {}", hex::encode(immediate))?;
    }
    Ok(true)
}

fn table_command<W: Write>(out: &mut W) -> Result<bool, CliError> {
    write_binary_table(out, "arith", &ARITHMETIC_PROMOTIONS)?;
    writeln!(out)?;
    write_binary_table(out, "shift", &SHIFT_PROMOTIONS)?;
    writeln!(out)?;

    let unary = [Operator::Neg, Operator::Not];
    write!(out, "{:<6}", "unary")?;
    for op in unary {
        write!(out, "{op:<6}")?;
    }
    writeln!(out)?;
    for typ in NumericType::ALL {
        write!(out, "{typ:<6}")?;
        for op in unary {
            let result = UNARY_PROMOTIONS
                .iter()
                .find(|(o, t, _)| *o == op && *t == typ)
                .and_then(|(_, _, result)| *result);
            write!(out, "{:<6}", cell(result))?;
        }
        writeln!(out)?;
    }
    Ok(true)
}

fn write_binary_table<W: Write>(out: &mut W, title: &str, table: &[BinaryRule]) -> io::Result<()> {
    write!(out, "{title:<6}")?;
    for right in NumericType::ALL {
        write!(out, "{right:<6}")?;
    }
    writeln!(out)?;
    for left in NumericType::ALL {
        write!(out, "{left:<6}")?;
        for (_, _, result) in table.iter().filter(|(l, _, _)| *l == left) {
            write!(out, "{:<6}", cell(*result))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn cell(result: Option<NumericType>) -> &'static str {
    result.map(|t| t.name()).unwrap_or("x")
}
