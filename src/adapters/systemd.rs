//! `systemctl show` handling
//!
//! Both live accessors query units the same way and differ only in how the
//! command reaches the host.

use std::collections::HashMap;

use crate::core::models::ServiceState;

/// Properties requested from `systemctl show`
pub const SHOW_PROPERTIES: &str = "LoadState,UnitFileState,ActiveState";

/// `UnitFileState` values that count as enabled (what `systemctl is-enabled`
/// reports with exit status 0)
const ENABLED_STATES: &[&str] =
    &["enabled", "enabled-runtime", "static", "alias", "indirect", "generated"];

/// Arguments for `systemctl show <unit>`
#[must_use]
pub fn show_args(unit: &str) -> Vec<String> {
    vec![
        "show".to_string(),
        unit.to_string(),
        format!("--property={SHOW_PROPERTIES}"),
    ]
}

/// Derive a service state from `systemctl show` output
///
/// Unknown units are reported by systemd with `LoadState=not-found`; empty
/// output is treated the same way.
#[must_use]
pub fn parse_show(output: &str) -> ServiceState {
    let properties: HashMap<&str, &str> = output
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    let load_state = properties.get("LoadState").copied().unwrap_or("not-found");
    let unit_file_state = properties.get("UnitFileState").copied().unwrap_or_default();
    let active_state = properties.get("ActiveState").copied().unwrap_or_default();

    let installed = !matches!(load_state, "not-found" | "");
    if !installed {
        return ServiceState::missing();
    }

    ServiceState {
        installed,
        enabled: ENABLED_STATES.contains(&unit_file_state),
        running: active_state == "active",
    }
}
