//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `local/` - the machine unitspec runs on
//! - `ssh` - a remote host through the system `ssh` binary
//! - `fixture/` - a simulated host described in TOML
//! - `toml/` - suite file parsing, discovery and writing
//! - `process`, `systemd` - command execution shared by live accessors

pub mod fixture;
pub mod local;
pub mod process;
pub mod ssh;
pub mod systemd;
pub mod toml;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::core::ports::TargetAccessor;

pub use fixture::FixtureTarget;
pub use local::LocalTarget;
pub use ssh::{SshDestination, SshTarget};

/// Which host to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// The local machine
    Local,
    /// A remote host reached via `ssh`
    Ssh(SshDestination),
    /// A simulated host loaded from a TOML file
    Fixture(PathBuf),
}

impl std::str::FromStr for TargetSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if let Some(rest) = s.strip_prefix("ssh://") {
            return rest.parse().map(Self::Ssh);
        }
        if let Some(path) = s.strip_prefix("fixture:")
            && !path.is_empty()
        {
            return Ok(Self::Fixture(PathBuf::from(path)));
        }
        Err(format!("Unknown target: {s}. Use: local, ssh://[user@]host[:port], fixture:PATH"))
    }
}

impl std::fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Ssh(destination) => write!(f, "{destination}"),
            Self::Fixture(path) => write!(f, "fixture:{}", path.display()),
        }
    }
}

/// Build the accessor for a target
pub fn connect(spec: &TargetSpec, config: &Config) -> anyhow::Result<Arc<dyn TargetAccessor>> {
    let accessor: Arc<dyn TargetAccessor> = match spec {
        TargetSpec::Local => Arc::new(LocalTarget::new(config)),
        TargetSpec::Ssh(destination) => Arc::new(SshTarget::new(destination.clone(), config)),
        TargetSpec::Fixture(path) => Arc::new(FixtureTarget::load(path)?),
    };
    Ok(accessor)
}
