//! Error taxonomy for expectation evaluation
//!
//! Nothing in here is fatal to a run. Access errors become `error` results,
//! model errors are reported while a suite is being loaded.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::{MatcherKind, ResourceKind, ValueType};

/// Errors raised while reading facts from a target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The resource or attribute could not be read
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The accessor did not answer in time
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The target could not be reached
    #[error("target unreachable: {0}")]
    Connectivity(String),

    /// The run deadline elapsed before this expectation completed
    #[error("cancelled")]
    Cancelled,
}

impl AccessError {
    /// The reportable kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ResourceUnavailable(_) => ErrorKind::ResourceUnavailable,
            Self::Timeout(_) => ErrorKind::AccessorTimeout,
            Self::Connectivity(_) => ErrorKind::AccessorConnectivity,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Serializable error classification attached to `error` results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Resource or attribute could not be read
    ResourceUnavailable,
    /// Target accessor timed out
    AccessorTimeout,
    /// Target unreachable
    AccessorConnectivity,
    /// Run deadline elapsed
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResourceUnavailable => write!(f, "resource_unavailable"),
            Self::AccessorTimeout => write!(f, "accessor_timeout"),
            Self::AccessorConnectivity => write!(f, "accessor_connectivity"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Errors raised while building expectations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Attribute name is not known for the resource kind
    #[error("unknown {kind} attribute: {name}")]
    UnknownAttribute {
        /// Resource kind the attribute was requested on
        kind: ResourceKind,
        /// The offending attribute name
        name: String,
    },

    /// Unknown matcher name
    #[error("unknown matcher: {0}. Use: eq, match, cmp")]
    UnknownMatcher(String),

    /// Matcher cannot be applied to the attribute's value type
    #[error("matcher '{matcher}' cannot be applied to {value_type} attribute '{attribute}'")]
    MatcherNotApplicable {
        /// Matcher kind
        matcher: MatcherKind,
        /// Attribute name
        attribute: &'static str,
        /// Value type of the attribute
        value_type: ValueType,
    },

    /// Permission mode could not be parsed
    #[error("invalid mode: {0}")]
    InvalidMode(String),

    /// Regular expression pattern failed to compile
    #[error("invalid pattern {pattern}: {reason}")]
    InvalidPattern {
        /// The pattern as written
        pattern: String,
        /// Compiler error message
        reason: String,
    },

    /// Resource identifier was empty
    #[error("empty {0} identifier")]
    EmptyIdentifier(ResourceKind),
}
