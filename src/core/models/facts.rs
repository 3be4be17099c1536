//! Facts reported by a target accessor
//!
//! These are the raw observations a target returns for a resource, before
//! any attribute is picked out of them.

use serde::{Deserialize, Serialize};

/// Observed state of a systemd unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceState {
    /// Unit file is known to the service manager
    pub installed: bool,
    /// Unit is enabled
    pub enabled: bool,
    /// Unit is active
    pub running: bool,
}

impl ServiceState {
    /// A unit the service manager has never heard of
    #[must_use]
    pub const fn missing() -> Self {
        Self {
            installed: false,
            enabled: false,
            running: false,
        }
    }
}

/// Metadata of an existing file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    /// Owning user name (or numeric uid when unmapped)
    pub owner: String,
    /// Owning group name (or numeric gid when unmapped)
    pub group: String,
    /// Permission bits, `st_mode & 0o7777`
    pub mode: u32,
}
