//! Evaluation of a single expectation
//!
//! Fetches the actual value through the accessor, applies the matcher, and
//! turns the outcome into an [`ExpectationResult`]. Failures and access
//! errors are results, never control flow.

use std::time::Duration;

use log::debug;

use crate::core::models::{
    AccessError, Attribute, Expectation, ExpectationResult, FileAttribute, Matcher, Outcome,
    Value,
};
use crate::core::ports::TargetAccessor;

use super::resolve::fetch;

/// Longest actual value shown verbatim in a result
const MAX_ACTUAL_LEN: usize = 120;

/// Evaluate one expectation, bounding the accessor call with `timeout`
pub async fn evaluate(
    accessor: &dyn TargetAccessor,
    index: usize,
    suite: &str,
    expectation: &Expectation,
    timeout: Duration,
) -> ExpectationResult {
    debug!("Evaluating #{index}: {expectation}");

    let fetched = tokio::time::timeout(
        timeout,
        fetch(accessor, expectation.resource(), expectation.attribute()),
    )
    .await
    .unwrap_or(Err(AccessError::Timeout(timeout)));

    judge(index, suite, expectation, fetched)
}

/// Turn a fetched value (or access error) into a result
///
/// This is pure logic with no I/O.
#[must_use]
pub fn judge(
    index: usize,
    suite: &str,
    expectation: &Expectation,
    fetched: Result<Value, AccessError>,
) -> ExpectationResult {
    let result = ExpectationResult {
        index,
        suite: suite.to_string(),
        resource: expectation.resource().clone(),
        attribute: expectation.attribute().name().to_string(),
        description: expectation.describe(),
        outcome: Outcome::Pass,
        actual: None,
        expected: expectation.matcher().expected_display(),
        diagnostic: None,
        error_kind: None,
    };

    let actual = match fetched {
        Ok(actual) => actual,
        Err(error) => return result.into_error(&error),
    };

    let passed = expectation.is_satisfied_by(&actual);
    let shown = summarize(expectation, &actual);

    ExpectationResult {
        outcome: if passed { Outcome::Pass } else { Outcome::Fail },
        diagnostic: (!passed).then(|| diagnose(expectation, &shown)),
        actual: Some(shown),
        ..result
    }
}

/// Render the actual value for a report, eliding long file contents
fn summarize(expectation: &Expectation, actual: &Value) -> String {
    match (expectation.attribute(), actual) {
        (Attribute::File(FileAttribute::Content), Value::Text(text))
            if text.chars().count() > MAX_ACTUAL_LEN =>
        {
            let head: String = text.chars().take(MAX_ACTUAL_LEN).collect();
            format!("{head:?}... ({} bytes)", text.len())
        },
        _ => actual.to_string(),
    }
}

fn diagnose(expectation: &Expectation, shown: &str) -> String {
    let expected = expectation.matcher().expected_display();
    match (expectation.matcher(), expectation.is_negated()) {
        (Matcher::Match(_), false) => format!("pattern {expected} not found in {shown}"),
        (Matcher::Match(_), true) => format!("pattern {expected} unexpectedly found"),
        (_, false) => format!("expected {expected}, got {shown}"),
        (_, true) => format!("expected anything but {expected}, got {shown}"),
    }
}
