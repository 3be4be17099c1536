//! Suite discovery
//!
//! Arguments may name suite files, directories (walked recursively for
//! `*.toml`) or glob patterns. Matches are sorted per argument and
//! deduplicated across arguments, keeping the first occurrence.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use super::LoadError;
use super::parser::load_file;
use crate::core::models::Suite;
use crate::paths;

/// Resolve suite arguments to an ordered list of suite files
pub fn discover(inputs: &[String]) -> Result<Vec<PathBuf>, LoadError> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        for path in expand(input)? {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(LoadError::NoSuites(inputs.join(", ")));
    }
    Ok(files)
}

/// Discover and parse suites
pub fn load_suites(inputs: &[String]) -> Result<Vec<Suite>, LoadError> {
    discover(inputs)?
        .iter()
        .map(|path| {
            debug!("Loading suite {}", path.display());
            load_file(path)
        })
        .collect()
}

fn expand(input: &str) -> Result<Vec<PathBuf>, LoadError> {
    let path = Path::new(input);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if path.is_dir() {
        return walk(path);
    }
    if is_glob(input) {
        return glob_files(input);
    }
    Err(LoadError::Pattern {
        pattern: input.to_string(),
        message: "no such file or directory".to_string(),
    })
}

fn walk(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| LoadError::Walk {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() && paths::is_suite_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>, LoadError> {
    let invalid = |message: String| LoadError::Pattern {
        pattern: pattern.to_string(),
        message,
    };

    let mut files = Vec::new();
    for entry in glob::glob(pattern).map_err(|e| invalid(e.to_string()))? {
        let path = entry.map_err(|e| invalid(e.to_string()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_glob(input: &str) -> bool {
    input.contains(['*', '?', '['])
}
