//! Simulated host described in TOML
//!
//! A fixture answers accessor calls from memory, optionally after an
//! artificial delay, so suites can be exercised without a live machine.
//!
//! ```toml
//! name = "web-1"
//! delay_ms = 0
//!
//! [[service]]
//! name = "test-service"
//! installed = true
//! enabled = true
//! running = false
//!
//! [[file]]
//! path = "/etc/systemd/system/test-service.service"
//! owner = "root"
//! group = "root"
//! mode = "0644"
//! content = "[Service]\nExecStart=/usr/bin/foo\n"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use crate::adapters::toml::{LoadError, RawMode};
use crate::core::models::{AccessError, FileStat, Resource, ServiceState};
use crate::core::ports::TargetAccessor;

#[derive(Debug, Clone)]
struct FixtureService {
    state: ServiceState,
    delay: Duration,
}

#[derive(Debug, Clone)]
struct FixtureFile {
    stat: FileStat,
    content: String,
    delay: Duration,
}

/// In-memory target
#[derive(Debug, Clone, Default)]
pub struct FixtureTarget {
    name: String,
    delay: Duration,
    unreachable: bool,
    services: HashMap<String, FixtureService>,
    files: HashMap<PathBuf, FixtureFile>,
}

impl FixtureTarget {
    /// Create an empty fixture host
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "memory".to_string(),
            ..Self::default()
        }
    }

    /// Add a unit; bare names get the `.service` suffix
    #[must_use]
    pub fn with_service(self, unit: &str, state: ServiceState) -> Self {
        self.with_slow_service(unit, state, Duration::ZERO)
    }

    /// Add a unit that takes `delay` to answer
    #[must_use]
    pub fn with_slow_service(mut self, unit: &str, state: ServiceState, delay: Duration) -> Self {
        self.services.insert(unit_name(unit), FixtureService { state, delay });
        self
    }

    /// Add an existing file
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, stat: FileStat, content: &str) -> Self {
        self.files.insert(
            path.into(),
            FixtureFile {
                stat,
                content: content.to_string(),
                delay: Duration::ZERO,
            },
        );
        self
    }

    /// Delay every call by `delay`
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make every call fail as if the host could not be reached
    #[must_use]
    pub const fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Load a fixture from a TOML file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawFixture = toml::from_str(&content).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_raw(raw, path)
    }

    fn from_raw(raw: RawFixture, path: &Path) -> Result<Self, LoadError> {
        let name = raw.name.unwrap_or_else(|| {
            path.file_stem().map_or_else(String::new, |s| s.to_string_lossy().into_owned())
        });

        let mut target = Self {
            name,
            delay: Duration::from_millis(raw.delay_ms),
            unreachable: raw.unreachable,
            ..Self::default()
        };

        for service in raw.services {
            let state = ServiceState {
                installed: service.installed,
                enabled: service.enabled,
                running: service.running,
            };
            let delay = Duration::from_millis(service.delay_ms);
            target = target.with_slow_service(&service.name, state, delay);
        }

        for file in raw.files {
            let mode = file.mode.to_mode().map_err(|source| LoadError::Model {
                path: path.to_path_buf(),
                source,
            })?;
            target.files.insert(
                file.path,
                FixtureFile {
                    stat: FileStat {
                        owner: file.owner,
                        group: file.group,
                        mode,
                    },
                    content: file.content,
                    delay: Duration::from_millis(file.delay_ms),
                },
            );
        }

        Ok(target)
    }

    async fn enter(&self, extra: Duration) -> Result<(), AccessError> {
        let delay = self.delay + extra;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.unreachable {
            return Err(AccessError::Connectivity(format!("{} is unreachable", self.describe())));
        }
        Ok(())
    }

    fn file_delay(&self, path: &Path) -> Duration {
        self.files.get(path).map_or(Duration::ZERO, |f| f.delay)
    }
}

fn unit_name(unit: &str) -> String {
    match Resource::service(unit) {
        Ok(resource) => resource.unit_name(),
        Err(_) => unit.to_string(),
    }
}

#[async_trait]
impl TargetAccessor for FixtureTarget {
    fn describe(&self) -> String {
        format!("fixture:{}", self.name)
    }

    async fn service(&self, unit: &str) -> Result<ServiceState, AccessError> {
        let entry = self.services.get(&unit_name(unit));
        self.enter(entry.map_or(Duration::ZERO, |s| s.delay)).await?;
        debug!("fixture {}: {unit}", self.name);
        Ok(entry.map_or_else(ServiceState::missing, |s| s.state))
    }

    async fn stat(&self, path: &Path) -> Result<Option<FileStat>, AccessError> {
        self.enter(self.file_delay(path)).await?;
        Ok(self.files.get(path).map(|f| f.stat.clone()))
    }

    async fn read(&self, path: &Path) -> Result<Option<String>, AccessError> {
        self.enter(self.file_delay(path)).await?;
        Ok(self.files.get(path).map(|f| f.content.clone()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFixture {
    name: Option<String>,
    #[serde(default)]
    delay_ms: u64,
    #[serde(default)]
    unreachable: bool,
    #[serde(default, rename = "service")]
    services: Vec<RawService>,
    #[serde(default, rename = "file")]
    files: Vec<RawFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawService {
    name: String,
    #[serde(default)]
    installed: bool,
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    running: bool,
    #[serde(default)]
    delay_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFile {
    path: PathBuf,
    #[serde(default = "default_account")]
    owner: String,
    #[serde(default = "default_account")]
    group: String,
    #[serde(default = "default_mode")]
    mode: RawMode,
    #[serde(default)]
    content: String,
    #[serde(default)]
    delay_ms: u64,
}

fn default_account() -> String {
    "root".to_string()
}

const fn default_mode() -> RawMode {
    RawMode::Integer(644)
}
