//! Tests for the assertion engine
//!
//! Drives the evaluator and runner with mock and fixture targets.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use unitspec::adapters::FixtureTarget;
use unitspec::adapters::toml::parse_suite;
use unitspec::core::models::{
    AccessError, ErrorKind, FileAttribute, Matcher, Outcome, Pattern, ServiceAttribute, Suite,
    Value,
};
use unitspec::core::services::{RunOptions, Runner, evaluate};

use crate::common::{
    MockTarget, UNIT_PATH, UNIT_TEXT, file, negated, root_stat, service, service_state,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn host() -> MockTarget {
    MockTarget::new()
        .with_service("test-service.service", service_state(true, true, false))
        .with_file(UNIT_PATH, root_stat(0o644), UNIT_TEXT)
}

// =============================================================================
// Attribute semantics
// =============================================================================

#[tokio::test]
async fn installed_but_not_running() {
    let target = host();
    let installed = service("test-service", ServiceAttribute::Installed, true);
    let running = service("test-service", ServiceAttribute::Running, true);

    let installed = evaluate(&target, 0, "launch", &installed, TIMEOUT).await;
    let running = evaluate(&target, 1, "launch", &running, TIMEOUT).await;

    assert_eq!(installed.outcome, Outcome::Pass);
    assert_eq!(running.outcome, Outcome::Fail);
    assert_eq!(running.actual.as_deref(), Some("false"));
    assert_eq!(running.diagnostic.as_deref(), Some("expected true, got false"));
}

#[tokio::test]
async fn bare_service_name_is_queried_as_unit() {
    let target = host();
    let expectation = service("test-service", ServiceAttribute::Enabled, true);

    let result = evaluate(&target, 0, "launch", &expectation, TIMEOUT).await;

    assert_eq!(result.outcome, Outcome::Pass);
    assert_eq!(target.calls(), vec!["service test-service.service"]);
}

#[tokio::test]
async fn unknown_service_is_not_installed() {
    let target = host();
    let expectation = service("other", ServiceAttribute::Installed, false);
    let result = evaluate(&target, 0, "launch", &expectation, TIMEOUT).await;
    assert_eq!(result.outcome, Outcome::Pass);
}

#[tokio::test]
async fn mode_written_as_text_or_integer() {
    let target = host();
    let text = format!("[[file]]\npath = \"{UNIT_PATH}\"\nmode = \"0644\"\n");
    let integer = format!("[[file]]\npath = \"{UNIT_PATH}\"\nmode = 644\n");
    let text = parse_suite(&text, Path::new("text.toml")).unwrap();
    let integer = parse_suite(&integer, Path::new("integer.toml")).unwrap();

    for suite in [text, integer] {
        let result = evaluate(&target, 0, &suite.title, &suite.expectations[0], TIMEOUT).await;
        assert_eq!(result.outcome, Outcome::Pass, "{}", suite.title);
        assert_eq!(result.actual.as_deref(), Some("0644"));
    }
}

#[tokio::test]
async fn mode_mismatch_fails() {
    let target = MockTarget::new().with_file(UNIT_PATH, root_stat(0o600), UNIT_TEXT);
    let expectation = file(UNIT_PATH, FileAttribute::Mode, Matcher::Cmp(Value::Mode(0o644)));

    let result = evaluate(&target, 0, "config", &expectation, TIMEOUT).await;

    assert_eq!(result.outcome, Outcome::Fail);
    assert_eq!(result.diagnostic.as_deref(), Some("expected 0644, got 0600"));
}

#[tokio::test]
async fn content_substring_match() {
    let target = host();
    let expectation = file(
        UNIT_PATH,
        FileAttribute::Content,
        Matcher::Match(Pattern::parse("ExecStart=").unwrap()),
    );

    let result = evaluate(&target, 0, "config", &expectation, TIMEOUT).await;

    assert_eq!(result.outcome, Outcome::Pass);
}

#[tokio::test]
async fn content_regex_match() {
    let target = host();
    let anchored = file(
        UNIT_PATH,
        FileAttribute::Content,
        Matcher::Match(Pattern::parse("/(?m)^Restart=on-failure$/").unwrap()),
    );
    let absent = file(
        UNIT_PATH,
        FileAttribute::Content,
        Matcher::Match(Pattern::parse("/(?m)^Type=forking$/").unwrap()),
    );

    assert_eq!(evaluate(&target, 0, "config", &anchored, TIMEOUT).await.outcome, Outcome::Pass);
    let result = evaluate(&target, 1, "config", &absent, TIMEOUT).await;
    assert_eq!(result.outcome, Outcome::Fail);
    assert!(result.diagnostic.unwrap().starts_with("pattern /(?m)^Type=forking$/ not found"));
}

#[tokio::test]
async fn missing_file_exists_fails_and_owner_errors() {
    let target = MockTarget::new();
    let exists = file(UNIT_PATH, FileAttribute::Exists, Matcher::Eq(Value::Bool(true)));
    let owner = file(UNIT_PATH, FileAttribute::Owner, Matcher::Eq(Value::Text("root".into())));
    let content = file(
        UNIT_PATH,
        FileAttribute::Content,
        Matcher::Match(Pattern::parse("ExecStart=").unwrap()),
    );

    let exists = evaluate(&target, 0, "config", &exists, TIMEOUT).await;
    let owner = evaluate(&target, 1, "config", &owner, TIMEOUT).await;
    let content = evaluate(&target, 2, "config", &content, TIMEOUT).await;

    assert_eq!(exists.outcome, Outcome::Fail);
    assert_eq!(owner.outcome, Outcome::Error);
    assert_eq!(owner.error_kind, Some(ErrorKind::ResourceUnavailable));
    assert_eq!(content.error_kind, Some(ErrorKind::ResourceUnavailable));
}

// =============================================================================
// Negation
// =============================================================================

#[tokio::test]
async fn negation_inverts_pass_and_fail() {
    let target = host();
    let running = service("test-service", ServiceAttribute::Running, true);
    let not_running = negated(&running);

    assert_eq!(evaluate(&target, 0, "s", &running, TIMEOUT).await.outcome, Outcome::Fail);
    let result = evaluate(&target, 1, "s", &not_running, TIMEOUT).await;
    assert_eq!(result.outcome, Outcome::Pass);
    assert_eq!(result.description, "should not be running");
}

#[tokio::test]
async fn negation_never_hides_errors() {
    let target = MockTarget::new();
    let owner = file(UNIT_PATH, FileAttribute::Owner, Matcher::Eq(Value::Text("root".into())));

    let result = evaluate(&target, 0, "s", &negated(&owner), TIMEOUT).await;

    assert_eq!(result.outcome, Outcome::Error);
}

// =============================================================================
// Runner
// =============================================================================

fn launch_suite() -> Suite {
    Suite::new(
        "launch",
        vec![
            service("test-service", ServiceAttribute::Installed, true),
            service("test-service", ServiceAttribute::Enabled, true),
            service("test-service", ServiceAttribute::Running, true),
            file(UNIT_PATH, FileAttribute::Mode, Matcher::Cmp(Value::Mode(0o644))),
            file(UNIT_PATH, FileAttribute::Owner, Matcher::Eq(Value::Text("root".into()))),
        ],
    )
}

#[tokio::test]
async fn repeated_runs_yield_identical_results() {
    let runner = Runner::new(Arc::new(host()), RunOptions::default());
    let suites = vec![launch_suite()];

    let first = runner.run(&suites).await;
    let second = runner.run(&suites).await;

    assert_eq!(first.results, second.results);
    assert_eq!(first.summary, second.summary);
}

#[tokio::test]
async fn errors_do_not_stop_the_run() {
    let target = host().failing(
        UNIT_PATH,
        AccessError::ResourceUnavailable("permission denied".to_string()),
    );
    let runner = Runner::new(Arc::new(target), RunOptions::default());

    let report = runner.run(&[launch_suite()]).await;

    let outcomes: Vec<Outcome> = report.results.iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        vec![Outcome::Pass, Outcome::Pass, Outcome::Fail, Outcome::Error, Outcome::Error]
    );
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.errors, 2);
    assert_eq!(report.exit_code(), 2);
}

#[tokio::test]
async fn unreachable_target_errors_every_expectation() {
    let runner = Runner::new(Arc::new(FixtureTarget::new().unreachable()), RunOptions::default());

    let report = runner.run(&[launch_suite()]).await;

    assert_eq!(report.results.len(), 5);
    assert!(
        report
            .results
            .iter()
            .all(|r| r.error_kind == Some(ErrorKind::AccessorConnectivity))
    );
}

#[tokio::test(start_paused = true)]
async fn run_deadline_cancels_slow_target() {
    let target = FixtureTarget::new()
        .with_service("test-service", service_state(true, true, true))
        .with_delay(Duration::from_secs(10));
    let options = RunOptions {
        jobs: 2,
        accessor_timeout: Duration::from_secs(60),
        run_timeout: Some(Duration::from_secs(1)),
    };

    let report = Runner::new(Arc::new(target), options).run(&[launch_suite()]).await;

    assert!(report.cancelled);
    assert_eq!(report.results.len(), 5);
    assert!(report.results.iter().all(|r| r.error_kind == Some(ErrorKind::Cancelled)));
    let indexes: Vec<usize> = report.results.iter().map(|r| r.index).collect();
    assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
}
