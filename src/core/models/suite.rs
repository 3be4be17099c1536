//! Suite model
//!
//! A suite is an ordered list of expectations loaded from one file.

use std::path::PathBuf;

use super::Expectation;

/// A titled, ordered group of expectations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    /// Suite title (falls back to the file stem)
    pub title: String,

    /// File the suite was loaded from, if any
    pub source: Option<PathBuf>,

    /// Expectations in declaration order
    pub expectations: Vec<Expectation>,
}

impl Suite {
    /// Create an in-memory suite
    #[must_use]
    pub fn new(title: impl Into<String>, expectations: Vec<Expectation>) -> Self {
        Self {
            title: title.into(),
            source: None,
            expectations,
        }
    }

    /// Number of expectations
    #[must_use]
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Whether the suite has no expectations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}
