//! TOML parser for suite files
//!
//! Resource blocks expand into expectations in a fixed order: services before
//! files, blocks in file order, and within a block the shorthand keys in
//! declaration order of the format followed by explicit `its` entries.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::LoadError;
use crate::core::models::{
    Attribute, Expectation, FileAttribute, Matcher, MatcherKind, ModelError, Resource,
    ServiceAttribute, Suite, Value, ValueType, mode_from_integer, parse_mode,
};

/// A suite file as written
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteFile {
    /// Suite title
    pub title: Option<String>,

    /// Service blocks
    #[serde(default, rename = "service")]
    pub services: Vec<ServiceEntry>,

    /// File blocks
    #[serde(default, rename = "file")]
    pub files: Vec<FileEntry>,
}

/// A `[[service]]` block
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceEntry {
    /// Unit name, `.service` is implied when no suffix is given
    pub name: String,
    /// Expected installed state
    pub installed: Option<bool>,
    /// Expected enabled state
    pub enabled: Option<bool>,
    /// Expected running state
    pub running: Option<bool>,
    /// Explicit expectations
    #[serde(default)]
    pub its: Vec<ItsEntry>,
}

/// A `[[file]]` block
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    /// Absolute path on the target
    pub path: String,
    /// Expected existence
    pub exists: Option<bool>,
    /// Expected owning user
    pub owner: Option<String>,
    /// Expected owning group
    pub group: Option<String>,
    /// Expected permission bits
    pub mode: Option<RawMode>,
    /// Patterns the content must match
    pub content: Option<Patterns>,
    /// Explicit expectations
    #[serde(default)]
    pub its: Vec<ItsEntry>,
}

/// An explicit `[[service.its]]` or `[[file.its]]` expectation
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItsEntry {
    /// Attribute name
    pub attribute: String,
    /// Matcher name: eq, match or cmp
    #[serde(default = "default_matcher")]
    pub matcher: String,
    /// Expected value
    pub expected: Option<RawValue>,
    /// Invert the outcome
    #[serde(default)]
    pub negate: bool,
}

fn default_matcher() -> String {
    "eq".to_string()
}

/// A permission mode written as a string (`"0644"`) or integer (`644`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawMode {
    /// Integer read as octal digits
    Integer(i64),
    /// Octal text
    Text(ModeText),
}

/// Octal mode text, kept as parsed bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeText(u32);

impl<'de> Deserialize<'de> for ModeText {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_mode(&text).map(ModeText).map_err(serde::de::Error::custom)
    }
}

impl RawMode {
    /// Permission bits
    pub fn to_mode(self) -> Result<u32, ModelError> {
        match self {
            Self::Integer(value) => mode_from_integer(value),
            Self::Text(ModeText(bits)) => Ok(bits),
        }
    }
}

/// One pattern or a list of patterns
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    /// A single pattern
    One(String),
    /// Several patterns, each its own expectation
    Many(Vec<String>),
}

impl Patterns {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(pattern) => vec![pattern],
            Self::Many(patterns) => patterns,
        }
    }
}

/// An expected value as written in an `its` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// `true` / `false`
    Bool(bool),
    /// Integer, octal digits for `mode`
    Integer(i64),
    /// Text
    Text(String),
}

impl RawValue {
    fn into_value(self, attribute: Attribute) -> Result<Value, ModelError> {
        match (self, attribute.value_type()) {
            (Self::Integer(value), ValueType::Mode) => mode_from_integer(value).map(Value::Mode),
            (Self::Integer(value), _) => Ok(Value::Text(value.to_string())),
            (Self::Bool(value), _) => Ok(Value::Bool(value)),
            (Self::Text(text), _) => Ok(Value::Text(text)),
        }
    }
}

/// Load and parse a suite file
pub fn load_file(path: &Path) -> Result<Suite, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut suite = parse_suite(&content, path)?;
    suite.source = Some(path.to_path_buf());
    Ok(suite)
}

/// Parse suite text; `path` names the file in errors and supplies the
/// default title
pub fn parse_suite(content: &str, path: &Path) -> Result<Suite, LoadError> {
    let file: SuiteFile = toml::from_str(content).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let title = file.title.unwrap_or_else(|| {
        path.file_stem().map_or_else(String::new, |s| s.to_string_lossy().into_owned())
    });

    let mut expectations = Vec::new();
    for service in file.services {
        expand_service(service, &mut expectations).map_err(|e| e.at(path))?;
    }
    for entry in file.files {
        expand_file(entry, &mut expectations).map_err(|e| e.at(path))?;
    }

    Ok(Suite::new(title, expectations))
}

/// Entry error before the file path is attached
#[derive(Debug)]
enum EntryError {
    Model(ModelError),
    Invalid(String),
}

impl From<ModelError> for EntryError {
    fn from(error: ModelError) -> Self {
        Self::Model(error)
    }
}

impl EntryError {
    fn at(self, path: &Path) -> LoadError {
        match self {
            Self::Model(source) => LoadError::Model {
                path: path.to_path_buf(),
                source,
            },
            Self::Invalid(message) => LoadError::Invalid {
                path: path.to_path_buf(),
                message,
            },
        }
    }
}

fn expand_service(entry: ServiceEntry, out: &mut Vec<Expectation>) -> Result<(), EntryError> {
    let resource = Resource::service(entry.name)?;

    let shorthand = [
        (ServiceAttribute::Installed, entry.installed),
        (ServiceAttribute::Enabled, entry.enabled),
        (ServiceAttribute::Running, entry.running),
    ];
    for (attribute, expected) in shorthand {
        if let Some(expected) = expected {
            out.push(Expectation::new(
                resource.clone(),
                Attribute::Service(attribute),
                Matcher::Eq(Value::Bool(expected)),
                false,
            )?);
        }
    }

    expand_its(&resource, entry.its, out)
}

fn expand_file(entry: FileEntry, out: &mut Vec<Expectation>) -> Result<(), EntryError> {
    let resource = Resource::file(entry.path)?;
    let push = |out: &mut Vec<Expectation>, attribute, matcher| -> Result<(), EntryError> {
        out.push(Expectation::new(resource.clone(), Attribute::File(attribute), matcher, false)?);
        Ok(())
    };

    if let Some(exists) = entry.exists {
        push(out, FileAttribute::Exists, Matcher::Eq(Value::Bool(exists)))?;
    }
    if let Some(owner) = entry.owner {
        push(out, FileAttribute::Owner, Matcher::Eq(Value::Text(owner)))?;
    }
    if let Some(group) = entry.group {
        push(out, FileAttribute::Group, Matcher::Eq(Value::Text(group)))?;
    }
    if let Some(mode) = entry.mode {
        push(out, FileAttribute::Mode, Matcher::Cmp(Value::Mode(mode.to_mode()?)))?;
    }
    for pattern in entry.content.map(Patterns::into_vec).unwrap_or_default() {
        let matcher = Matcher::from_parts(MatcherKind::Match, Value::Text(pattern))?;
        push(out, FileAttribute::Content, matcher)?;
    }

    expand_its(&resource, entry.its, out)
}

fn expand_its(
    resource: &Resource,
    entries: Vec<ItsEntry>,
    out: &mut Vec<Expectation>,
) -> Result<(), EntryError> {
    for entry in entries {
        let attribute = Attribute::parse(resource.kind, &entry.attribute)?;
        let kind: MatcherKind = entry.matcher.parse()?;
        let expected = match entry.expected {
            Some(raw) => raw.into_value(attribute)?,
            // bare boolean attributes assert true
            None if attribute.value_type() == ValueType::Bool => Value::Bool(true),
            None => {
                return Err(EntryError::Invalid(format!(
                    "{} {}: '{}' needs an expected value",
                    resource.kind, resource.identifier, entry.attribute
                )));
            },
        };

        out.push(Expectation::new(
            resource.clone(),
            attribute,
            Matcher::from_parts(kind, expected)?,
            entry.negate,
        )?);
    }
    Ok(())
}
