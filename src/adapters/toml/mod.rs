//! TOML suite files
//!
//! - [`parser`] - Deserialize suite files into expectations
//! - [`loader`] - Find suite files from paths, directories and globs
//! - [`writer`] - Starter suite written by `unitspec init`

pub mod loader;
pub mod parser;
pub mod writer;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::models::ModelError;

pub use loader::{discover, load_suites};
pub use parser::{RawMode, load_file, parse_suite};
pub use writer::starter_suite;

/// Errors raised while loading suites and fixtures
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File is not valid TOML or does not have the expected shape
    #[error("invalid suite file {}: {message}", .path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// An entry could not be turned into an expectation
    #[error("{}: {source}", .path.display())]
    Model {
        /// File containing the entry
        path: PathBuf,
        /// What was wrong with it
        source: ModelError,
    },

    /// An explicit `its` entry is incomplete
    #[error("{}: {message}", .path.display())]
    Invalid {
        /// File containing the entry
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// A suite argument is neither a file, a directory nor a valid glob
    #[error("invalid suite path or pattern {pattern}: {message}")]
    Pattern {
        /// The argument as given
        pattern: String,
        /// Why it was rejected
        message: String,
    },

    /// Directory traversal failed
    #[error("cannot walk {}: {message}", .path.display())]
    Walk {
        /// Directory being walked
        path: PathBuf,
        /// Walker message
        message: String,
    },

    /// Nothing to run
    #[error("no suite files found in {0}")]
    NoSuites(String),
}
