//! List suites without evaluating them

use unitspec::adapters::toml;
use unitspec::core::models::exit_code;
use unitspec::output::{ListResult, OutputMode, SuiteInfo};

/// Print suites and their expectations
pub fn list(paths: &[String], mode: OutputMode) -> anyhow::Result<u8> {
    let inputs = super::suite_inputs(paths)?;
    let suites = toml::load_suites(&inputs)?;

    let result = ListResult {
        suites: suites
            .iter()
            .map(|suite| SuiteInfo {
                title: suite.title.clone(),
                path: suite
                    .source
                    .as_ref()
                    .map_or_else(String::new, |p| p.display().to_string()),
                expectations: suite.expectations.iter().map(ToString::to_string).collect(),
            })
            .collect(),
    };

    result.render(mode);
    Ok(exit_code::SUCCESS)
}
