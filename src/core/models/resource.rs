//! Resource model
//!
//! A resource is a handle to an entity on the target system whose
//! attributes can be queried: a systemd service or a file.

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Unit type suffixes understood by systemd
const UNIT_SUFFIXES: &[&str] = &[
    "service",
    "socket",
    "device",
    "mount",
    "automount",
    "swap",
    "target",
    "path",
    "timer",
    "slice",
    "scope",
];

/// The kind of entity a resource refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A systemd unit managed by the service manager
    Service,
    /// A file on the target filesystem
    File,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service => write!(f, "service"),
            Self::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "service" => Ok(Self::Service),
            "file" => Ok(Self::File),
            _ => Err(format!("Unknown resource kind: {s}. Use: service, file")),
        }
    }
}

/// A resource on the target, resolved lazily
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Resource {
    /// Service or file
    pub kind: ResourceKind,

    /// Unit name for services, absolute path for files
    pub identifier: String,
}

impl Resource {
    /// Create a resource, rejecting blank identifiers
    pub fn new(kind: ResourceKind, identifier: impl Into<String>) -> Result<Self, ModelError> {
        let identifier = identifier.into().trim().to_string();
        if identifier.is_empty() {
            return Err(ModelError::EmptyIdentifier(kind));
        }
        Ok(Self { kind, identifier })
    }

    /// Service resource for a unit name
    pub fn service(name: impl Into<String>) -> Result<Self, ModelError> {
        Self::new(ResourceKind::Service, name)
    }

    /// File resource for a path
    pub fn file(path: impl Into<String>) -> Result<Self, ModelError> {
        Self::new(ResourceKind::File, path)
    }

    /// Fully qualified unit name for a service resource
    ///
    /// A bare name such as `test-service` is queried as
    /// `test-service.service`; names that already carry a unit suffix are
    /// left alone.
    #[must_use]
    pub fn unit_name(&self) -> String {
        let has_suffix = self
            .identifier
            .rsplit_once('.')
            .is_some_and(|(stem, suffix)| !stem.is_empty() && UNIT_SUFFIXES.contains(&suffix));

        if has_suffix {
            self.identifier.clone()
        } else {
            format!("{}.service", self.identifier)
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ResourceKind::Service => write!(f, "Service {}", self.identifier),
            ResourceKind::File => write!(f, "File {}", self.identifier),
        }
    }
}
