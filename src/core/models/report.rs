//! Run results
//!
//! One [`ExpectationResult`] per expectation per run, collected into a
//! [`Report`]. Nothing here is persisted beyond the run.

use serde::Serialize;

use super::{AccessError, ErrorKind, Resource};

/// Outcome of evaluating one expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Actual value satisfied the expectation
    Pass,
    /// Actual value was read but did not satisfy the expectation
    Fail,
    /// Actual value could not be read
    Error,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Result of a single expectation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectationResult {
    /// Position of the expectation in the run
    pub index: usize,
    /// Title of the suite the expectation came from
    pub suite: String,
    /// Resource under test
    pub resource: Resource,
    /// Attribute name
    pub attribute: String,
    /// Human description of the expectation
    pub description: String,
    /// Pass, fail, or error
    pub outcome: Outcome,
    /// Actual value, when it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Expected value as written after normalization
    pub expected: String,
    /// Why it failed or errored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    /// Classification of an error outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ExpectationResult {
    /// Turn this result into an error result, keeping its identity
    #[must_use]
    pub fn into_error(mut self, error: &AccessError) -> Self {
        self.outcome = Outcome::Error;
        self.actual = None;
        self.diagnostic = Some(error.to_string());
        self.error_kind = Some(error.kind());
        self
    }
}

/// Outcome counts for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// Total expectations
    pub total: usize,
    /// Passed expectations
    pub passed: usize,
    /// Failed expectations
    pub failed: usize,
    /// Errored expectations
    pub errors: usize,
}

impl Summary {
    /// Count outcomes in a result list
    #[must_use]
    pub fn from_results(results: &[ExpectationResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.total += 1;
            match result.outcome {
                Outcome::Pass => summary.passed += 1,
                Outcome::Fail => summary.failed += 1,
                Outcome::Error => summary.errors += 1,
            }
            summary
        })
    }
}

/// Process exit status for a finished run
pub mod exit_code {
    /// Every expectation passed
    pub const SUCCESS: u8 = 0;
    /// At least one expectation failed, none errored
    pub const FAILED: u8 = 1;
    /// At least one expectation errored
    pub const ERRORED: u8 = 2;
    /// Suites or configuration could not be loaded
    pub const CONFIG: u8 = 3;
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Target description
    pub target: String,
    /// When the run started (RFC3339)
    pub started_at: String,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
    /// Whether the run deadline elapsed
    pub cancelled: bool,
    /// Outcome counts
    pub summary: Summary,
    /// One result per expectation, in expectation order
    pub results: Vec<ExpectationResult>,
}

impl Report {
    /// Whether every expectation passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.summary.failed == 0 && self.summary.errors == 0
    }

    /// Exit status: errors outrank failures
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.summary.errors > 0 {
            exit_code::ERRORED
        } else if self.summary.failed > 0 {
            exit_code::FAILED
        } else {
            exit_code::SUCCESS
        }
    }
}
