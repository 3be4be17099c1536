//! Shared test fixtures and helpers
//!
//! Builders for expectations and a recording mock target.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use unitspec::core::models::{
    AccessError, Attribute, Expectation, FileAttribute, FileStat, Matcher, Resource,
    ServiceAttribute, ServiceState, Value,
};
use unitspec::core::ports::TargetAccessor;

pub const UNIT_PATH: &str = "/etc/systemd/system/test-service.service";

pub const UNIT_TEXT: &str = "\
[Unit]
Description=Test service

[Service]
ExecStart=/usr/bin/test-service --foreground
Restart=on-failure

[Install]
WantedBy=multi-user.target
";

/// Mock target that records every call and can be told to fail
#[derive(Default)]
pub struct MockTarget {
    services: HashMap<String, ServiceState>,
    files: HashMap<PathBuf, (FileStat, String)>,
    failures: HashMap<String, AccessError>,
    calls: Mutex<Vec<String>>,
}

impl MockTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, unit: &str, state: ServiceState) -> Self {
        self.services.insert(unit.to_string(), state);
        self
    }

    pub fn with_file(mut self, path: &str, stat: FileStat, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), (stat, content.to_string()));
        self
    }

    /// Fail calls whose key (unit name or path) equals `key`
    pub fn failing(mut self, key: &str, error: AccessError) -> Self {
        self.failures.insert(key.to_string(), error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String, key: &str) -> Result<(), AccessError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.get(key) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TargetAccessor for MockTarget {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn service(&self, unit: &str) -> Result<ServiceState, AccessError> {
        self.record(format!("service {unit}"), unit)?;
        Ok(self.services.get(unit).copied().unwrap_or_else(ServiceState::missing))
    }

    async fn stat(&self, path: &Path) -> Result<Option<FileStat>, AccessError> {
        let key = path.to_string_lossy();
        self.record(format!("stat {key}"), &key)?;
        Ok(self.files.get(path).map(|(stat, _)| stat.clone()))
    }

    async fn read(&self, path: &Path) -> Result<Option<String>, AccessError> {
        let key = path.to_string_lossy();
        self.record(format!("read {key}"), &key)?;
        Ok(self.files.get(path).map(|(_, content)| content.clone()))
    }
}

pub fn root_stat(mode: u32) -> FileStat {
    FileStat {
        owner: "root".to_string(),
        group: "root".to_string(),
        mode,
    }
}

pub fn service_state(installed: bool, enabled: bool, running: bool) -> ServiceState {
    ServiceState {
        installed,
        enabled,
        running,
    }
}

pub fn service(name: &str, attribute: ServiceAttribute, expected: bool) -> Expectation {
    Expectation::new(
        Resource::service(name).unwrap(),
        Attribute::Service(attribute),
        Matcher::Eq(Value::Bool(expected)),
        false,
    )
    .unwrap()
}

pub fn file(path: &str, attribute: FileAttribute, matcher: Matcher) -> Expectation {
    Expectation::new(Resource::file(path).unwrap(), Attribute::File(attribute), matcher, false)
        .unwrap()
}

pub fn negated(expectation: &Expectation) -> Expectation {
    Expectation::new(
        expectation.resource().clone(),
        expectation.attribute(),
        expectation.matcher().clone(),
        !expectation.is_negated(),
    )
    .unwrap()
}

pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}
