//! Matchers compare an actual attribute value against an expected one
//!
//! - `eq` - exact equality (modes compare numerically)
//! - `match` - pattern search in text
//! - `cmp` - loose comparison after normalizing representation
//!
//! Pattern syntax: `/regex/` is a regular expression, anything else is a
//! literal substring.

use regex::Regex;
use serde::Serialize;

use super::{ModelError, Value, ValueType, parse_mode};

/// Matcher kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatcherKind {
    /// Exact equality
    Eq,
    /// Pattern search
    Match,
    /// Normalized comparison
    Cmp,
}

impl std::fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eq => write!(f, "eq"),
            Self::Match => write!(f, "match"),
            Self::Cmp => write!(f, "cmp"),
        }
    }
}

impl std::str::FromStr for MatcherKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eq" | "eql" | "equal" => Ok(Self::Eq),
            "match" => Ok(Self::Match),
            "cmp" => Ok(Self::Cmp),
            _ => Err(ModelError::UnknownMatcher(s.to_string())),
        }
    }
}

/// A text pattern used by the `match` matcher
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Literal substring
    Substring(String),
    /// Regular expression, written as `/expr/`
    Regex(Regex),
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Substring(a), Self::Substring(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Pattern {}

impl Pattern {
    /// Parse a pattern; `/.../` compiles as a regex
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let expr = raw
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .filter(|_| raw.len() >= 2);

        match expr {
            Some(expr) => Regex::new(expr).map(Self::Regex).map_err(|e| {
                ModelError::InvalidPattern {
                    pattern: raw.to_string(),
                    reason: e.to_string(),
                }
            }),
            None => Ok(Self::Substring(raw.to_string())),
        }
    }

    /// Whether the pattern is found within `text`
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Substring(needle) => text.contains(needle.as_str()),
            Self::Regex(regex) => regex.is_match(text),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Substring(needle) => write!(f, "{needle:?}"),
            Self::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

/// A matcher with its expected value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Exact equality
    Eq(Value),
    /// Pattern search in text
    Match(Pattern),
    /// Normalized comparison
    Cmp(Value),
}

impl Matcher {
    /// The matcher kind
    #[must_use]
    pub const fn kind(&self) -> MatcherKind {
        match self {
            Self::Eq(_) => MatcherKind::Eq,
            Self::Match(_) => MatcherKind::Match,
            Self::Cmp(_) => MatcherKind::Cmp,
        }
    }

    /// Build a matcher from its kind and a raw expected value
    pub fn from_parts(kind: MatcherKind, expected: Value) -> Result<Self, ModelError> {
        match kind {
            MatcherKind::Eq => Ok(Self::Eq(expected)),
            MatcherKind::Cmp => Ok(Self::Cmp(expected)),
            MatcherKind::Match => match expected {
                Value::Text(raw) => Pattern::parse(&raw).map(Self::Match),
                other => Pattern::parse(&other.to_string()).map(Self::Match),
            },
        }
    }

    /// Normalize the expected value to the attribute's value type
    ///
    /// Mode expectations become numeric here, so `'0644'` and `644` compare
    /// the same way at evaluation time.
    pub(crate) fn normalize(
        self,
        attribute: &'static str,
        value_type: ValueType,
    ) -> Result<Self, ModelError> {
        let not_applicable = |matcher: MatcherKind| ModelError::MatcherNotApplicable {
            matcher,
            attribute,
            value_type,
        };

        match (value_type, self) {
            (ValueType::Mode, Self::Eq(expected)) => Ok(Self::Eq(Value::Mode(expected.to_mode()?))),
            (ValueType::Mode, Self::Cmp(expected)) => {
                Ok(Self::Cmp(Value::Mode(expected.to_mode()?)))
            },
            (ValueType::Bool, matcher @ (Self::Eq(Value::Bool(_)) | Self::Cmp(Value::Bool(_)))) => {
                Ok(matcher)
            },
            (ValueType::Bool, Self::Cmp(Value::Text(text))) => {
                match text.trim().to_lowercase().as_str() {
                    "true" => Ok(Self::Cmp(Value::Bool(true))),
                    "false" => Ok(Self::Cmp(Value::Bool(false))),
                    _ => Err(not_applicable(MatcherKind::Cmp)),
                }
            },
            (
                ValueType::Text,
                matcher @ (Self::Eq(Value::Text(_)) | Self::Cmp(Value::Text(_)) | Self::Match(_)),
            ) => Ok(matcher),
            (_, matcher) => Err(not_applicable(matcher.kind())),
        }
    }

    /// Apply the matcher to an actual value
    #[must_use]
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Self::Eq(expected) => expected == actual,
            Self::Match(pattern) => match actual {
                Value::Text(text) => pattern.is_match(text),
                other => pattern.is_match(&other.to_string()),
            },
            Self::Cmp(expected) => compare(expected, actual),
        }
    }

    /// Expected value rendered for diagnostics
    #[must_use]
    pub fn expected_display(&self) -> String {
        match self {
            Self::Eq(value) | Self::Cmp(value) => value.to_string(),
            Self::Match(pattern) => pattern.to_string(),
        }
    }
}

/// Loose comparison used by `cmp`
fn compare(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Mode(e), Value::Mode(a)) => e == a,
        (Value::Mode(e), Value::Text(a)) | (Value::Text(a), Value::Mode(e)) => {
            parse_mode(a).is_ok_and(|a| a == *e)
        },
        (Value::Bool(e), Value::Bool(a)) => e == a,
        (Value::Bool(b), Value::Text(t)) | (Value::Text(t), Value::Bool(b)) => {
            t.trim().eq_ignore_ascii_case(&b.to_string())
        },
        (Value::Text(e), Value::Text(a)) => compare_text(e, a),
        (Value::Mode(_), Value::Bool(_)) | (Value::Bool(_), Value::Mode(_)) => false,
    }
}

/// Numeric when both sides are integers, case-insensitive otherwise
fn compare_text(expected: &str, actual: &str) -> bool {
    match (expected.trim().parse::<i64>(), actual.trim().parse::<i64>()) {
        (Ok(e), Ok(a)) => e == a,
        _ => expected.eq_ignore_ascii_case(actual),
    }
}
