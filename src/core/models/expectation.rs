//! Expectation model
//!
//! An expectation is a single declarative assertion about one attribute of
//! one resource: "service `test-service` should be running", "file
//! `/etc/systemd/system/test-service.service` mode should cmp 0644".

use super::{Attribute, Matcher, ModelError, Resource, Value, ValueType};

/// A single assertion about a resource attribute
///
/// Immutable once built. Construction checks that the attribute belongs to
/// the resource kind and that the matcher applies to the attribute's value
/// type, normalizing the expected value on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    resource: Resource,
    attribute: Attribute,
    matcher: Matcher,
    negated: bool,
}

impl Expectation {
    /// Build a validated expectation
    pub fn new(
        resource: Resource,
        attribute: Attribute,
        matcher: Matcher,
        negated: bool,
    ) -> Result<Self, ModelError> {
        if attribute.kind() != resource.kind {
            return Err(ModelError::UnknownAttribute {
                kind: resource.kind,
                name: attribute.name().to_string(),
            });
        }

        let matcher = matcher.normalize(attribute.name(), attribute.value_type())?;

        Ok(Self {
            resource,
            attribute,
            matcher,
            negated,
        })
    }

    /// Resource the expectation is about
    #[must_use]
    pub const fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Attribute under test
    #[must_use]
    pub const fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Matcher and expected value
    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Whether the outcome is inverted (`should_not`)
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether `actual` satisfies this expectation
    #[must_use]
    pub fn is_satisfied_by(&self, actual: &Value) -> bool {
        self.matcher.matches(actual) != self.negated
    }

    /// Human description, e.g. `should be running` or `owner should eq "root"`
    #[must_use]
    pub fn describe(&self) -> String {
        if self.attribute.value_type() == ValueType::Bool
            && let Matcher::Eq(Value::Bool(expected)) = &self.matcher
        {
            let positive = *expected != self.negated;
            let verb = if positive { "should" } else { "should not" };
            return format!("{verb} {}", self.attribute.predicate());
        }

        let verb = if self.negated { "should not" } else { "should" };
        format!(
            "{} {verb} {} {}",
            self.attribute.name(),
            self.matcher.kind(),
            self.matcher.expected_display()
        )
    }
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.resource, self.describe())
    }
}
