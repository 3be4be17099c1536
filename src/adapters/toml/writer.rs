//! Starter suite written by `unitspec init`

use std::fmt::Write;

use crate::core::models::{ModelError, Resource};

/// Unit file directory for administrator-installed units
const UNIT_DIR: &str = "/etc/systemd/system";

/// Render a starter suite checking `service`
///
/// The unit file is expected under `/etc/systemd/system`, named the way the
/// service expectation queries the unit.
pub fn starter_suite(service: &str) -> Result<String, ModelError> {
    let resource = Resource::service(service)?;
    let unit_path = format!("{UNIT_DIR}/{}", resource.unit_name());

    let mut out = String::new();
    out.push_str("# unitspec suite\n\n");
    let title = format!("{} integration tests", resource.identifier);
    let _ = writeln!(out, "title = {}", quoted(&title));
    out.push('\n');

    out.push_str("[[service]]\n");
    let _ = writeln!(out, "name = {}", quoted(&resource.identifier));
    out.push_str("installed = true\nenabled = true\nrunning = true\n\n");

    out.push_str("[[file]]\n");
    let _ = writeln!(out, "path = {}", quoted(&unit_path));
    out.push_str("exists = true\nowner = \"root\"\ngroup = \"root\"\nmode = \"0644\"\n");
    out.push_str("content = [\"Description=\", \"ExecStart=\", \"WantedBy=\"]\n\n");

    out.push_str("# Explicit form:\n");
    out.push_str("# [[file.its]]\n");
    out.push_str("# attribute = \"content\"\n");
    out.push_str("# matcher = \"match\"          # eq | match | cmp\n");
    out.push_str("# expected = \"/^Restart=/\"\n");
    out.push_str("# negate = false\n");
    Ok(out)
}

/// A TOML string literal for `text`
fn quoted(text: &str) -> String {
    toml::Value::String(text.to_string()).to_string()
}
