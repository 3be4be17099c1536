//! Attribute resolution
//!
//! Maps a (resource, attribute) pair onto accessor calls and picks the
//! attribute value out of the returned facts.

use std::path::Path;

use crate::core::models::{
    AccessError, Attribute, FileAttribute, FileStat, Resource, ServiceAttribute, Value,
};
use crate::core::ports::TargetAccessor;

/// Fetch the actual value of an attribute from the target
///
/// `exists` on a missing file is `false`; every other file attribute on a
/// missing file is [`AccessError::ResourceUnavailable`].
pub async fn fetch(
    accessor: &dyn TargetAccessor,
    resource: &Resource,
    attribute: Attribute,
) -> Result<Value, AccessError> {
    let path = Path::new(&resource.identifier);

    match attribute {
        Attribute::Service(attribute) => {
            let state = accessor.service(&resource.unit_name()).await?;
            let value = match attribute {
                ServiceAttribute::Installed => state.installed,
                ServiceAttribute::Enabled => state.enabled,
                ServiceAttribute::Running => state.running,
            };
            Ok(Value::Bool(value))
        },
        Attribute::File(FileAttribute::Exists) => {
            Ok(Value::Bool(accessor.stat(path).await?.is_some()))
        },
        Attribute::File(FileAttribute::Content) => accessor
            .read(path)
            .await?
            .map(Value::Text)
            .ok_or_else(|| missing(resource)),
        Attribute::File(FileAttribute::Owner) => {
            existing(accessor, resource).await.map(|stat| Value::Text(stat.owner))
        },
        Attribute::File(FileAttribute::Group) => {
            existing(accessor, resource).await.map(|stat| Value::Text(stat.group))
        },
        Attribute::File(FileAttribute::Mode) => {
            existing(accessor, resource).await.map(|stat| Value::Mode(stat.mode))
        },
    }
}

async fn existing(
    accessor: &dyn TargetAccessor,
    resource: &Resource,
) -> Result<FileStat, AccessError> {
    accessor
        .stat(Path::new(&resource.identifier))
        .await?
        .ok_or_else(|| missing(resource))
}

fn missing(resource: &Resource) -> AccessError {
    AccessError::ResourceUnavailable(format!("{} does not exist", resource.identifier))
}
