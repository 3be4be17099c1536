//! External command execution
//!
//! Shared by the local and ssh accessors. Every command is bounded by a
//! timeout and killed when it is abandoned.

use std::process::{Output, Stdio};
use std::time::Duration;

use log::debug;
use tokio::process::Command;

/// Why a command did not produce output
#[derive(Debug)]
pub enum CommandFailure {
    /// The program could not be started
    Spawn(std::io::Error),
    /// The program did not exit in time and was killed
    Timeout(Duration),
}

impl std::fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn(e) => write!(f, "{e}"),
            Self::Timeout(limit) => write!(f, "timed out after {}ms", limit.as_millis()),
        }
    }
}

/// Run `program args...` and capture its output
pub async fn run(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<Output, CommandFailure> {
    debug!("Running {program} {}", args.join(" "));

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(CommandFailure::Spawn)?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output.map_err(CommandFailure::Spawn),
        Err(_) => Err(CommandFailure::Timeout(timeout)),
    }
}

/// Lossy UTF-8 stdout
#[must_use]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Trimmed lossy UTF-8 stderr
#[must_use]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Quote a word for a POSIX shell
#[must_use]
pub fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}
