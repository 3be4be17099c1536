//! User and group names from `/etc/passwd` and `/etc/group`

use std::collections::HashMap;

/// Id-to-name maps for users and groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountDb {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl AccountDb {
    /// Parse passwd- and group-formatted text
    ///
    /// Both formats carry the name in field 0 and the numeric id in field 2.
    /// Malformed lines and comments are skipped; the first entry for an id
    /// wins.
    #[must_use]
    pub fn parse(passwd: &str, group: &str) -> Self {
        Self {
            users: parse_ids(passwd),
            groups: parse_ids(group),
        }
    }

    /// User name for a uid, or the uid itself
    #[must_use]
    pub fn user_name(&self, uid: u32) -> String {
        self.users.get(&uid).cloned().unwrap_or_else(|| uid.to_string())
    }

    /// Group name for a gid, or the gid itself
    #[must_use]
    pub fn group_name(&self, gid: u32) -> String {
        self.groups.get(&gid).cloned().unwrap_or_else(|| gid.to_string())
    }
}

fn parse_ids(text: &str) -> HashMap<u32, String> {
    let mut ids = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(':');
        let (Some(name), Some(_), Some(id)) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        if let Ok(id) = id.parse::<u32>() {
            ids.entry(id).or_insert_with(|| name.to_string());
        }
    }
    ids
}
