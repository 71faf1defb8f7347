//! Scenario matrix runner
//!
//! Runs named scenarios through the [`ArithmeticEngine`] and reports each one
//! as okay / NOT okay, tallied per group. This is the behavioural test matrix
//! a backend is checked against: each scenario binds typed operands, applies
//! one operator, optionally stores the result into a destination type, and
//! compares the typed outcome with the expectation.

pub mod scenario;

pub use scenario::{load_matrix, parse_matrix, Expectation, MatrixError, MatrixFile, Scenario};

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info, warn};

use crate::engine::{ArithmeticEngine, EngineError, OperationResult};

/// Result of running a single scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed { reason: String },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFailure {
    pub name: String,
    pub group: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupTally {
    pub passed: usize,
    pub failed: usize,
}

/// Totals for a matrix run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixReport {
    pub passed: usize,
    pub failures: Vec<ScenarioFailure>,
    pub groups: BTreeMap<String, GroupTally>,
}

impl MatrixReport {
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: MatrixReport) {
        self.passed += other.passed;
        self.failures.extend(other.failures);
        for (group, tally) in other.groups {
            let entry = self.groups.entry(group).or_default();
            entry.passed += tally.passed;
            entry.failed += tally.failed;
        }
    }
}

impl fmt::Display for MatrixReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (group, tally) in &self.groups {
            writeln!(f, "{group}: {} okay, {} NOT okay", tally.passed, tally.failed)?;
        }
        for failure in &self.failures {
            writeln!(f, "  {} NOT okay: {}", failure.name, failure.reason)?;
        }
        write!(f, "{}/{} scenarios okay", self.passed, self.total())
    }
}

/// Run one scenario and compare against its expectation.
pub fn run_scenario(engine: &ArithmeticEngine, scenario: &Scenario) -> Outcome {
    let result = match scenario.assign {
        Some(target) => engine.evaluate_into(scenario.op, &scenario.operands, target),
        None => engine.evaluate(scenario.op, &scenario.operands),
    };
    check(&scenario.expect, result)
}

fn check(expect: &Expectation, result: Result<OperationResult, EngineError>) -> Outcome {
    match (expect, result) {
        (Expectation::Value(expected), Ok(actual)) if actual.value == *expected => Outcome::Passed,
        (Expectation::Value(expected), Ok(actual)) => Outcome::Failed {
            reason: format!(
                "expected {expected}, got {} ({})",
                actual.value,
                actual.value.to_hex()
            ),
        },
        (Expectation::Value(expected), Err(e)) => Outcome::Failed {
            reason: format!("expected {expected}, got error: {e}"),
        },
        (Expectation::Error { error }, Err(e)) if e.kind() == *error => Outcome::Passed,
        (Expectation::Error { error }, Err(e)) => Outcome::Failed {
            reason: format!("expected {error:?} error, got: {e}"),
        },
        (Expectation::Error { error }, Ok(actual)) => Outcome::Failed {
            reason: format!("expected {error:?} error, got {}", actual.value),
        },
    }
}

/// Run every scenario of a matrix in file order.
pub fn run_matrix(engine: &ArithmeticEngine, matrix: &MatrixFile) -> MatrixReport {
    let mut report = MatrixReport::default();
    let mut current_group: Option<&str> = None;

    for scenario in &matrix.scenarios {
        if current_group != Some(scenario.group.as_str()) {
            info!("---{}:", scenario.group);
            current_group = Some(scenario.group.as_str());
        }

        let tally = report.groups.entry(scenario.group.clone()).or_default();
        match run_scenario(engine, scenario) {
            Outcome::Passed => {
                debug!(expr = %scenario.describe(), "{} okay", scenario.name);
                tally.passed += 1;
                report.passed += 1;
            }
            Outcome::Failed { reason } => {
                warn!(expr = %scenario.describe(), "{} NOT okay: {reason}", scenario.name);
                tally.failed += 1;
                report.failures.push(ScenarioFailure {
                    name: scenario.name.clone(),
                    group: scenario.group.clone(),
                    reason,
                });
            }
        }
    }

    info!(passed = report.passed, total = report.total(), "matrix complete");
    report
}
