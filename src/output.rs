//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Outcome, Report};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Render a run report
pub fn render_report(report: &Report, mode: OutputMode) {
    match mode {
        OutputMode::Human => print!("{}", format_human(report)),
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(report).unwrap_or_default());
        },
    }
}

/// Format a report as human-readable text
///
/// Results are grouped by suite, then by consecutive resource, in
/// expectation order.
#[must_use]
pub fn format_human(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Target: {}", report.target);

    let mut suite: Option<&str> = None;
    let mut resource = None;
    for result in &report.results {
        if suite != Some(result.suite.as_str()) {
            suite = Some(result.suite.as_str());
            resource = None;
            let _ = writeln!(out, "\n{}", result.suite.as_str().bold());
        }
        if resource != Some(&result.resource) {
            resource = Some(&result.resource);
            let _ = writeln!(out, "  {}", result.resource);
        }

        let mark = match result.outcome {
            Outcome::Pass => "\u{2714}".green(),
            Outcome::Fail => "\u{2716}".red(),
            Outcome::Error => "!".yellow(),
        };
        let _ = writeln!(out, "    {mark} {}", result.description);

        if let Some(diagnostic) = &result.diagnostic {
            match result.error_kind {
                Some(kind) => {
                    let _ = writeln!(out, "        {diagnostic} ({kind})");
                },
                None => {
                    let _ = writeln!(out, "        {diagnostic}");
                },
            }
        }
    }

    let summary = &report.summary;
    let mut line = format!(
        "{} expectations, {} passed, {} failed, {} errors",
        summary.total, summary.passed, summary.failed, summary.errors
    );
    let _ = write!(line, " ({}ms)", report.duration_ms);
    let line = if summary.errors > 0 {
        line.as_str().yellow()
    } else if summary.failed > 0 {
        line.as_str().red()
    } else {
        line.as_str().green()
    };
    let _ = writeln!(out, "\nSummary: {line}");

    if report.cancelled {
        let notice = "Run timeout elapsed; unfinished expectations were cancelled";
        let _ = writeln!(out, "{}", notice.yellow());
    }
    out
}

/// A suite as listed by `unitspec list`
#[derive(Debug, Serialize)]
pub struct SuiteInfo {
    /// Suite title
    pub title: String,
    /// Source file
    pub path: String,
    /// Expectation descriptions in order
    pub expectations: Vec<String>,
}

/// Result of a list operation
#[derive(Debug, Serialize)]
pub struct ListResult {
    /// Suites found
    pub suites: Vec<SuiteInfo>,
}

impl ListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.suites.is_empty() {
            println!("No suites found.");
            return;
        }

        for suite in &self.suites {
            println!("{} ({})", suite.title.as_str().bold(), suite.path);
            for expectation in &suite.expectations {
                println!("  {expectation}");
            }
            println!();
        }
        let total: usize = self.suites.iter().map(|s| s.expectations.len()).sum();
        println!("{} suite(s), {total} expectation(s)", self.suites.len());
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
