//! Target accessor port
//!
//! Defines how the engine reads facts from the machine under test.

use std::path::Path;

use async_trait::async_trait;

use crate::core::models::{AccessError, FileStat, ServiceState};

/// Read-only access to a target machine
///
/// Implementations perform the actual lookups: local filesystem and service
/// manager queries, commands over `ssh`, or an in-memory fixture. Calls may
/// block on I/O; the runner bounds each one with a timeout.
#[async_trait]
pub trait TargetAccessor: Send + Sync {
    /// Short description of the target, e.g. `local` or `ssh://web-1`
    fn describe(&self) -> String;

    /// Query the service manager for a fully qualified unit name
    async fn service(&self, unit: &str) -> Result<ServiceState, AccessError>;

    /// Stat a file, `Ok(None)` when it does not exist
    async fn stat(&self, path: &Path) -> Result<Option<FileStat>, AccessError>;

    /// Read a file as text, `Ok(None)` when it does not exist
    async fn read(&self, path: &Path) -> Result<Option<String>, AccessError>;
}
