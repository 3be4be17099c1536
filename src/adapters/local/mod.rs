//! Local host accessor
//!
//! Reads files straight from the local filesystem and asks the local
//! service manager about units.

mod accounts;

use std::io::ErrorKind as IoErrorKind;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::OnceCell;

use crate::adapters::process::{self, CommandFailure};
use crate::adapters::systemd;
use crate::config::Config;
use crate::core::models::{AccessError, FileStat, ServiceState};
use crate::core::ports::TargetAccessor;

pub use accounts::AccountDb;

/// Accessor for the machine unitspec runs on
#[derive(Debug, Clone)]
pub struct LocalTarget {
    systemctl: String,
    passwd: PathBuf,
    group: PathBuf,
    command_timeout: Duration,
    accounts: OnceCell<AccountDb>,
}

impl LocalTarget {
    /// Create a local accessor from configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            systemctl: config.systemd.systemctl.clone(),
            passwd: config.accounts.passwd.clone(),
            group: config.accounts.group.clone(),
            command_timeout: Duration::from_secs(config.run.accessor_timeout_secs.max(1)),
            accounts: OnceCell::new(),
        }
    }

    /// Account names, read on first use
    async fn accounts(&self) -> &AccountDb {
        self.accounts
            .get_or_init(|| async {
                let passwd = read_account_file(&self.passwd).await;
                let group = read_account_file(&self.group).await;
                AccountDb::parse(&passwd, &group)
            })
            .await
    }
}

async fn read_account_file(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Cannot read {}: {e}; owners will be shown as numeric ids", path.display());
            String::new()
        },
    }
}

#[async_trait]
impl TargetAccessor for LocalTarget {
    fn describe(&self) -> String {
        "local".to_string()
    }

    async fn service(&self, unit: &str) -> Result<ServiceState, AccessError> {
        let output = process::run(&self.systemctl, &systemd::show_args(unit), self.command_timeout)
            .await
            .map_err(|failure| match failure {
                CommandFailure::Timeout(limit) => AccessError::Timeout(limit),
                CommandFailure::Spawn(e) => AccessError::ResourceUnavailable(format!(
                    "cannot run {}: {e}",
                    self.systemctl
                )),
            })?;

        if !output.status.success() {
            return Err(AccessError::ResourceUnavailable(format!(
                "{} show {unit} failed: {}",
                self.systemctl,
                process::stderr(&output)
            )));
        }

        let state = systemd::parse_show(&process::stdout(&output));
        debug!("{unit}: {state:?}");
        Ok(state)
    }

    async fn stat(&self, path: &Path) -> Result<Option<FileStat>, AccessError> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(unavailable(path, &e)),
        };

        let accounts = self.accounts().await;
        Ok(Some(FileStat {
            owner: accounts.user_name(metadata.uid()),
            group: accounts.group_name(metadata.gid()),
            mode: metadata.mode() & 0o7777,
        }))
    }

    async fn read(&self, path: &Path) -> Result<Option<String>, AccessError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(path, &e)),
        }
    }
}

fn unavailable(path: &Path, error: &std::io::Error) -> AccessError {
    AccessError::ResourceUnavailable(format!("{}: {error}", path.display()))
}
