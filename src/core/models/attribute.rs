//! Resource attributes and their values
//!
//! Attributes are tagged by resource kind so a service attribute can never
//! be asked of a file. Every attribute has a fixed value type that decides
//! which matchers apply to it.

use serde::Serialize;

use super::{ModelError, ResourceKind};

/// Attributes of a service resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAttribute {
    /// Unit file is known to the service manager
    Installed,
    /// Unit is enabled to start
    Enabled,
    /// Unit is currently active
    Running,
}

/// Attributes of a file resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAttribute {
    /// File exists
    Exists,
    /// Owning user name
    Owner,
    /// Owning group name
    Group,
    /// Permission bits
    Mode,
    /// Raw text content
    Content,
}

/// An attribute of some resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Attribute {
    /// Service attribute
    Service(ServiceAttribute),
    /// File attribute
    File(FileAttribute),
}

/// The type of value an attribute produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `true` / `false`
    Bool,
    /// Free text
    Text,
    /// Permission bits
    Mode,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool => write!(f, "boolean"),
            Self::Text => write!(f, "text"),
            Self::Mode => write!(f, "mode"),
        }
    }
}

impl Attribute {
    /// Look up an attribute by name for a resource kind
    pub fn parse(kind: ResourceKind, name: &str) -> Result<Self, ModelError> {
        let attribute = match (kind, name.trim().to_lowercase().as_str()) {
            (ResourceKind::Service, "installed") => Self::Service(ServiceAttribute::Installed),
            (ResourceKind::Service, "enabled") => Self::Service(ServiceAttribute::Enabled),
            (ResourceKind::Service, "running") => Self::Service(ServiceAttribute::Running),
            (ResourceKind::File, "exists" | "exist") => Self::File(FileAttribute::Exists),
            (ResourceKind::File, "owner") => Self::File(FileAttribute::Owner),
            (ResourceKind::File, "group") => Self::File(FileAttribute::Group),
            (ResourceKind::File, "mode") => Self::File(FileAttribute::Mode),
            (ResourceKind::File, "content") => Self::File(FileAttribute::Content),
            _ => {
                return Err(ModelError::UnknownAttribute {
                    kind,
                    name: name.to_string(),
                });
            },
        };
        Ok(attribute)
    }

    /// Resource kind this attribute belongs to
    #[must_use]
    pub const fn kind(self) -> ResourceKind {
        match self {
            Self::Service(_) => ResourceKind::Service,
            Self::File(_) => ResourceKind::File,
        }
    }

    /// Value type produced by this attribute
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Service(_) | Self::File(FileAttribute::Exists) => ValueType::Bool,
            Self::File(FileAttribute::Mode) => ValueType::Mode,
            Self::File(FileAttribute::Owner | FileAttribute::Group | FileAttribute::Content) => {
                ValueType::Text
            },
        }
    }

    /// Canonical attribute name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Service(ServiceAttribute::Installed) => "installed",
            Self::Service(ServiceAttribute::Enabled) => "enabled",
            Self::Service(ServiceAttribute::Running) => "running",
            Self::File(FileAttribute::Exists) => "exists",
            Self::File(FileAttribute::Owner) => "owner",
            Self::File(FileAttribute::Group) => "group",
            Self::File(FileAttribute::Mode) => "mode",
            Self::File(FileAttribute::Content) => "content",
        }
    }

    /// Predicate phrasing for boolean attributes (`be installed`, `exist`)
    #[must_use]
    pub const fn predicate(self) -> &'static str {
        match self {
            Self::Service(ServiceAttribute::Installed) => "be installed",
            Self::Service(ServiceAttribute::Enabled) => "be enabled",
            Self::Service(ServiceAttribute::Running) => "be running",
            Self::File(FileAttribute::Exists) => "exist",
            _ => self.name(),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An attribute value, actual or expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// Text value
    Text(String),
    /// Permission bits
    Mode(u32),
}

impl Value {
    /// Normalize this value to permission bits
    pub fn to_mode(&self) -> Result<u32, ModelError> {
        match self {
            Self::Mode(mode) => Ok(*mode),
            Self::Text(text) => parse_mode(text),
            Self::Bool(b) => Err(ModelError::InvalidMode(b.to_string())),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Mode(mode) => write!(f, "{mode:04o}"),
        }
    }
}

/// Largest permission value, including setuid/setgid/sticky bits
const MAX_MODE: u32 = 0o7777;

/// Parse a permission mode written as octal text
///
/// Accepts `0644`, `644`, `0o644` and surrounding whitespace.
pub fn parse_mode(text: &str) -> Result<u32, ModelError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(8)) {
        return Err(ModelError::InvalidMode(text.to_string()));
    }

    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= MAX_MODE => Ok(mode),
        _ => Err(ModelError::InvalidMode(text.to_string())),
    }
}

/// Interpret an integer written in a suite as octal digits
///
/// `644` means `0o644`, the way it reads in `chmod 644`.
pub fn mode_from_integer(value: i64) -> Result<u32, ModelError> {
    if value < 0 {
        return Err(ModelError::InvalidMode(value.to_string()));
    }
    parse_mode(&value.to_string())
}
