//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use std::path::PathBuf;

use test_case::test_case;
use unitspec::adapters::TargetSpec;
use unitspec::core::models::{
    Attribute, FileAttribute, Matcher, MatcherKind, Pattern, Resource, ResourceKind,
    ServiceAttribute, Value, parse_mode,
};

// =============================================================================
// Mode Parsing Tests
// =============================================================================

#[test_case("0644", 0o644 ; "leading zero")]
#[test_case("644", 0o644 ; "bare digits")]
#[test_case("0o644", 0o644 ; "rust style prefix")]
#[test_case("0755", 0o755 ; "executable")]
#[test_case("4755", 0o4755 ; "setuid")]
#[test_case("0", 0 ; "zero")]
fn test_mode_forms(input: &str, expected: u32) {
    assert_eq!(parse_mode(input), Ok(expected));
}

#[test_case("" ; "empty")]
#[test_case("0648" ; "non octal digit")]
#[test_case("rw-r--r--" ; "symbolic")]
#[test_case("77777" ; "too large")]
fn test_mode_errors(input: &str) {
    assert!(parse_mode(input).is_err());
}

// =============================================================================
// Matcher Tests
// =============================================================================

#[test_case("eq", MatcherKind::Eq ; "eq")]
#[test_case("eql", MatcherKind::Eq ; "eql alias")]
#[test_case("MATCH", MatcherKind::Match ; "uppercase match")]
#[test_case("cmp", MatcherKind::Cmp ; "cmp")]
fn test_matcher_kind_parsing(input: &str, expected: MatcherKind) {
    assert_eq!(input.parse::<MatcherKind>(), Ok(expected));
}

#[test_case("root", "root", true ; "same text")]
#[test_case("Root", "root", true ; "case insensitive")]
#[test_case("0", "00", true ; "numeric text")]
#[test_case("root", "daemon", false ; "different text")]
fn test_cmp_text(expected: &str, actual: &str, passes: bool) {
    let matcher = Matcher::Cmp(Value::Text(expected.to_string()));
    assert_eq!(matcher.matches(&Value::Text(actual.to_string())), passes);
}

#[test_case("ExecStart=", "ExecStart=/usr/bin/foo", true ; "substring found")]
#[test_case("ExecStart=", "ExecStop=/usr/bin/foo", false ; "substring missing")]
#[test_case("/^Exec/", "ExecStart=", true ; "anchored regex")]
#[test_case("/^Exec/", "# ExecStart=", false ; "anchored regex rejects")]
#[test_case("a+b", "xa+by", true ; "metacharacters literal")]
fn test_pattern(pattern: &str, text: &str, expected: bool) {
    assert_eq!(Pattern::parse(pattern).unwrap().is_match(text), expected);
}

// =============================================================================
// Attribute Tests
// =============================================================================

#[test_case(ResourceKind::Service, "running", Attribute::Service(ServiceAttribute::Running) ; "service running")]
#[test_case(ResourceKind::File, "exist", Attribute::File(FileAttribute::Exists) ; "exist alias")]
#[test_case(ResourceKind::File, "Mode", Attribute::File(FileAttribute::Mode) ; "mixed case mode")]
fn test_attribute_parsing(kind: ResourceKind, name: &str, expected: Attribute) {
    assert_eq!(Attribute::parse(kind, name), Ok(expected));
}

#[test_case(ResourceKind::Service, "owner" ; "file attribute on service")]
#[test_case(ResourceKind::File, "running" ; "service attribute on file")]
#[test_case(ResourceKind::File, "size" ; "unknown attribute")]
fn test_attribute_errors(kind: ResourceKind, name: &str) {
    assert!(Attribute::parse(kind, name).is_err());
}

// =============================================================================
// Resource Tests
// =============================================================================

#[test_case("test-service", "test-service.service" ; "bare name")]
#[test_case("test-service.service", "test-service.service" ; "already qualified")]
#[test_case("test-service.socket", "test-service.socket" ; "socket unit")]
#[test_case("backup.timer", "backup.timer" ; "timer unit")]
fn test_unit_name(name: &str, expected: &str) {
    assert_eq!(Resource::service(name).unwrap().unit_name(), expected);
}

// =============================================================================
// Target Tests
// =============================================================================

#[test_case("local", TargetSpec::Local ; "local")]
#[test_case("LOCAL", TargetSpec::Local ; "uppercase local")]
#[test_case("fixture:hosts/web.toml", TargetSpec::Fixture(PathBuf::from("hosts/web.toml")) ; "fixture")]
fn test_target_parsing(input: &str, expected: TargetSpec) {
    assert_eq!(input.parse::<TargetSpec>(), Ok(expected));
}

#[test_case("ssh://web-1", "ssh://web-1" ; "host only")]
#[test_case("ssh://deploy@web-1", "ssh://deploy@web-1" ; "with user")]
#[test_case("ssh://web-1:2222/", "ssh://web-1:2222" ; "with port and slash")]
fn test_ssh_target_display(input: &str, expected: &str) {
    assert_eq!(input.parse::<TargetSpec>().unwrap().to_string(), expected);
}

#[test_case("" ; "empty")]
#[test_case("docker://web" ; "unsupported scheme")]
#[test_case("ssh://web:port" ; "bad port")]
fn test_target_errors(input: &str) {
    assert!(input.parse::<TargetSpec>().is_err());
}
