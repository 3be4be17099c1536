//! Command implementations

mod check;
mod init;
mod list;

use unitspec::paths;

pub use check::{CheckArgs, check};
pub use init::init;
pub use list::list;

/// Suite arguments, or the default suite directory when none are given
fn suite_inputs(inputs: &[String]) -> anyhow::Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs.to_vec());
    }
    let cwd = std::env::current_dir()?;
    Ok(vec![paths::default_suite_dir(&cwd).to_string_lossy().into_owned()])
}
