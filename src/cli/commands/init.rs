//! Write a starter suite

use std::fs;
use std::path::PathBuf;

use unitspec::adapters::toml;
use unitspec::core::models::exit_code;
use unitspec::output::{OperationResult, OutputMode};
use unitspec::paths;

/// Create `<dir>/default.toml` checking `service`
pub fn init(
    dir: Option<PathBuf>,
    service: &str,
    force: bool,
    mode: OutputMode,
) -> anyhow::Result<u8> {
    let dir = match dir {
        Some(dir) => dir,
        None => paths::default_suite_dir(&std::env::current_dir()?),
    };
    let suite_path = paths::default_suite_file(&dir);

    if suite_path.exists() && !force {
        OperationResult {
            success: false,
            message: format!(
                "Already initialized ({} exists). Use --force to overwrite.",
                suite_path.display()
            ),
        }
        .render(mode);
        return Ok(exit_code::SUCCESS);
    }

    let content = toml::starter_suite(service)?;
    fs::create_dir_all(&dir)?;
    fs::write(&suite_path, content)?;

    OperationResult {
        success: true,
        message: format!("Created {}\nRun 'unitspec check' to evaluate it", suite_path.display()),
    }
    .render(mode);
    Ok(exit_code::SUCCESS)
}
