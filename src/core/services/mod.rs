//! Evaluation services
//!
//! - [`resolve`] - pick attribute values out of accessor facts
//! - [`evaluator`] - apply a matcher to one expectation
//! - [`runner`] - evaluate whole suites concurrently under deadlines

pub mod evaluator;
pub mod resolve;
pub mod runner;

pub use evaluator::{evaluate, judge};
pub use resolve::fetch;
pub use runner::{DEFAULT_ACCESSOR_TIMEOUT, DEFAULT_JOBS, RunOptions, Runner};
