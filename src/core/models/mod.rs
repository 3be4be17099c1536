//! Domain models for unitspec
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Resource`] - a service or file on the target
//! - [`Attribute`] - a queryable property of a resource
//! - [`Matcher`] - how actual and expected values are compared
//! - [`Expectation`] - "this attribute of this resource should ..."
//! - [`Suite`] - an ordered list of expectations
//! - [`Report`] - one result per expectation

mod attribute;
mod error;
mod expectation;
mod facts;
mod matcher;
mod report;
mod resource;
mod suite;

pub use attribute::{
    Attribute, FileAttribute, ServiceAttribute, Value, ValueType, mode_from_integer, parse_mode,
};
pub use error::{AccessError, ErrorKind, ModelError};
pub use expectation::Expectation;
pub use facts::{FileStat, ServiceState};
pub use matcher::{Matcher, MatcherKind, Pattern};
pub use report::{ExpectationResult, Outcome, Report, Summary, exit_code};
pub use resource::{Resource, ResourceKind};
pub use suite::Suite;
