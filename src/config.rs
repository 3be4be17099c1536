//! Global configuration management
//!
//! Provides persistent defaults for targets, timeouts and the external
//! programs used to query a host. Config is stored at
//! `~/.config/unitspec/config.toml` (XDG standard). Command-line flags
//! override anything set here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::services::RunOptions;
use crate::paths;

/// Global unitspec configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Run defaults
    #[serde(default)]
    pub run: RunConfig,
    /// Service manager settings
    #[serde(default)]
    pub systemd: SystemdConfig,
    /// Remote access settings
    #[serde(default)]
    pub ssh: SshConfig,
    /// Account database locations used to name file owners
    #[serde(default)]
    pub accounts: AccountsConfig,
}

/// Run defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Default target (`local`, `ssh://host`, `fixture:path`)
    #[serde(default = "default_target")]
    pub target: String,
    /// Bound on the whole run, unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Bound on each accessor call
    #[serde(default = "default_accessor_timeout_secs")]
    pub accessor_timeout_secs: u64,
    /// Expectations evaluated concurrently
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

fn default_target() -> String {
    "local".to_string()
}

const fn default_accessor_timeout_secs() -> u64 {
    10
}

const fn default_jobs() -> usize {
    crate::core::services::DEFAULT_JOBS
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            timeout_secs: None,
            accessor_timeout_secs: default_accessor_timeout_secs(),
            jobs: default_jobs(),
        }
    }
}

/// Service manager settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemdConfig {
    /// `systemctl` program name or path
    #[serde(default = "default_systemctl")]
    pub systemctl: String,
}

fn default_systemctl() -> String {
    "systemctl".to_string()
}

impl Default for SystemdConfig {
    fn default() -> Self {
        Self {
            systemctl: default_systemctl(),
        }
    }
}

/// Remote access settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConfig {
    /// `ssh` program name or path
    #[serde(default = "default_ssh_program")]
    pub program: String,
    /// Extra options passed before the destination
    #[serde(default = "default_ssh_options")]
    pub options: Vec<String>,
}

fn default_ssh_program() -> String {
    "ssh".to_string()
}

fn default_ssh_options() -> Vec<String> {
    vec!["-o".to_string(), "BatchMode=yes".to_string()]
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            program: default_ssh_program(),
            options: default_ssh_options(),
        }
    }
}

/// Account database locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsConfig {
    /// User database
    #[serde(default = "default_passwd")]
    pub passwd: PathBuf,
    /// Group database
    #[serde(default = "default_group")]
    pub group: PathBuf,
}

fn default_passwd() -> PathBuf {
    PathBuf::from("/etc/passwd")
}

fn default_group() -> PathBuf {
    PathBuf::from("/etc/group")
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            passwd: default_passwd(),
            group: default_group(),
        }
    }
}

impl Config {
    /// Get the config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load config from the global location, or defaults if absent
    ///
    /// A file that exists but cannot be parsed is reported and ignored.
    #[must_use]
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        Self::load_from(&path).unwrap_or_else(|e| {
            warn!("Ignoring unreadable config {}: {e}", path.display());
            Self::default()
        })
    }

    /// Load config from an explicit path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a path, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Run options derived from the `[run]` section
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            jobs: self.run.jobs.max(1),
            accessor_timeout: Duration::from_secs(self.run.accessor_timeout_secs.max(1)),
            run_timeout: self.run.timeout_secs.map(Duration::from_secs),
        }
    }
}
