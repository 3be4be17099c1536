//! Remote host accessor over the system `ssh` binary
//!
//! The transport is entirely delegated to `ssh`; this adapter only builds
//! remote commands and interprets their output. `ssh` exits with 255 when
//! the connection itself fails, which is reported as a connectivity error.
//!
//! File commands first test for the path and exit with a dedicated status
//! when it is absent, so a missing file never depends on the remote locale's
//! error messages.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::adapters::process::{self, CommandFailure, shell_quote};
use crate::adapters::systemd;
use crate::config::Config;
use crate::core::models::{AccessError, FileStat, ServiceState};
use crate::core::ports::TargetAccessor;

/// Exit status `ssh` uses for its own errors
const SSH_ERROR_STATUS: i32 = 255;

/// Exit status of a remote file command when the path does not exist
const MISSING_STATUS: i32 = 44;

/// Where to connect: `[user@]host[:port]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshDestination {
    /// Remote login name
    pub user: Option<String>,
    /// Host name or address
    pub host: String,
    /// Port, when not the default
    pub port: Option<u16>,
}

impl std::str::FromStr for SshDestination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.trim().trim_end_matches('/');
        let (user, rest) = match rest.split_once('@') {
            Some((user, rest)) if !user.is_empty() => (Some(user.to_string()), rest),
            Some(_) => return Err(format!("Invalid ssh destination: {s}")),
            None => (None, rest),
        };

        let (host, port) = match rest.rsplit_once(':') {
            Some((host, port)) => {
                let port =
                    port.parse::<u16>().map_err(|_| format!("Invalid ssh port in: {s}"))?;
                (host, Some(port))
            },
            None => (rest, None),
        };

        if host.is_empty() {
            return Err(format!("Missing ssh host in: {s}"));
        }

        Ok(Self {
            user,
            host: host.to_string(),
            port,
        })
    }
}

impl std::fmt::Display for SshDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ssh://")?;
        if let Some(user) = &self.user {
            write!(f, "{user}@")?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// Accessor for a remote host reached through `ssh`
#[derive(Debug, Clone)]
pub struct SshTarget {
    destination: SshDestination,
    program: String,
    options: Vec<String>,
    systemctl: String,
    command_timeout: Duration,
}

impl SshTarget {
    /// Create an ssh accessor from configuration
    #[must_use]
    pub fn new(destination: SshDestination, config: &Config) -> Self {
        Self {
            destination,
            program: config.ssh.program.clone(),
            options: config.ssh.options.clone(),
            systemctl: config.systemd.systemctl.clone(),
            command_timeout: Duration::from_secs(config.run.accessor_timeout_secs.max(1)),
        }
    }

    /// Arguments passed to `ssh` to run `remote_command` on the host
    #[must_use]
    pub fn ssh_args(&self, remote_command: &str) -> Vec<String> {
        let mut args = self.options.clone();
        if let Some(port) = self.destination.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        let login = match &self.destination.user {
            Some(user) => format!("{user}@{}", self.destination.host),
            None => self.destination.host.clone(),
        };
        args.push(login);
        args.push("--".to_string());
        args.push(remote_command.to_string());
        args
    }

    async fn remote(&self, remote_command: &str) -> Result<Output, AccessError> {
        let args = self.ssh_args(remote_command);
        let output = process::run(&self.program, &args, self.command_timeout)
            .await
            .map_err(|failure| match failure {
                CommandFailure::Timeout(limit) => AccessError::Timeout(limit),
                CommandFailure::Spawn(e) => {
                    AccessError::Connectivity(format!("cannot run {}: {e}", self.program))
                },
            })?;

        if output.status.code() == Some(SSH_ERROR_STATUS) {
            return Err(AccessError::Connectivity(format!(
                "{}: {}",
                self.destination,
                process::stderr(&output)
            )));
        }
        Ok(output)
    }
}

/// Run `command` on `path` only when the path exists
fn guarded(path: &Path, command: &str) -> String {
    let path_arg = shell_quote(&path.to_string_lossy());
    format!("[ -e {path_arg} ] || exit {MISSING_STATUS}; LC_ALL=C {command} -- {path_arg}")
}

fn is_missing(output: &Output) -> bool {
    output.status.code() == Some(MISSING_STATUS)
}

/// Parse `stat -c '%a %u %g %U %G'` output
///
/// `stat` prints `UNKNOWN` for ids without a name; those fall back to the
/// numeric id.
fn parse_stat(text: &str) -> Option<FileStat> {
    let mut fields = text.split_whitespace();
    let mode = u32::from_str_radix(fields.next()?, 8).ok()?;
    let uid = fields.next()?;
    let gid = fields.next()?;
    let owner = fields.next()?;
    let group = fields.next()?;
    let name_or_id = |name: &str, id: &str| {
        if name == "UNKNOWN" { id.to_string() } else { name.to_string() }
    };
    Some(FileStat {
        owner: name_or_id(owner, uid),
        group: name_or_id(group, gid),
        mode: mode & 0o7777,
    })
}

#[async_trait]
impl TargetAccessor for SshTarget {
    fn describe(&self) -> String {
        self.destination.to_string()
    }

    async fn service(&self, unit: &str) -> Result<ServiceState, AccessError> {
        let command = std::iter::once(self.systemctl.as_str())
            .map(shell_quote)
            .chain(systemd::show_args(unit).into_iter().map(|arg| shell_quote(&arg)))
            .collect::<Vec<_>>()
            .join(" ");

        let output = self.remote(&command).await?;
        if !output.status.success() {
            return Err(AccessError::ResourceUnavailable(format!(
                "systemctl show {unit} failed: {}",
                process::stderr(&output)
            )));
        }

        let state = systemd::parse_show(&process::stdout(&output));
        debug!("{}: {unit}: {state:?}", self.destination);
        Ok(state)
    }

    async fn stat(&self, path: &Path) -> Result<Option<FileStat>, AccessError> {
        let output = self.remote(&guarded(path, "stat -L -c '%a %u %g %U %G'")).await?;

        if is_missing(&output) {
            return Ok(None);
        }
        if !output.status.success() {
            return Err(AccessError::ResourceUnavailable(format!(
                "stat {} failed: {}",
                path.display(),
                process::stderr(&output)
            )));
        }

        parse_stat(&process::stdout(&output)).map(Some).ok_or_else(|| {
            AccessError::ResourceUnavailable(format!(
                "unexpected stat output for {}",
                path.display()
            ))
        })
    }

    async fn read(&self, path: &Path) -> Result<Option<String>, AccessError> {
        let output = self.remote(&guarded(path, "cat")).await?;

        if is_missing(&output) {
            return Ok(None);
        }
        if output.status.success() {
            return Ok(Some(process::stdout(&output)));
        }
        Err(AccessError::ResourceUnavailable(format!(
            "cat {} failed: {}",
            path.display(),
            process::stderr(&output)
        )))
    }
}
