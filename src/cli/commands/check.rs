//! Evaluate suites against a target

use anyhow::{Context, bail};
use log::debug;

use unitspec::adapters::{self, TargetSpec, toml};
use unitspec::config::Config;
use unitspec::core::services::Runner;
use unitspec::output::{OutputMode, render_report};

/// Flags of `unitspec check`; each one overrides the config value
#[derive(Debug, Default)]
pub struct CheckArgs {
    /// Suite files, directories or globs
    pub paths: Vec<String>,
    /// Target spec
    pub target: Option<String>,
    /// Run timeout in seconds
    pub timeout: Option<u64>,
    /// Accessor timeout in seconds
    pub accessor_timeout: Option<u64>,
    /// Concurrency limit
    pub jobs: Option<usize>,
}

impl CheckArgs {
    fn apply(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(target) = &self.target {
            config.run.target.clone_from(target);
        }
        if let Some(timeout) = self.timeout {
            config.run.timeout_secs = Some(timeout);
        }
        if let Some(accessor_timeout) = self.accessor_timeout {
            if accessor_timeout == 0 {
                bail!("--accessor-timeout must be at least 1 second");
            }
            config.run.accessor_timeout_secs = accessor_timeout;
        }
        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                bail!("--jobs must be at least 1");
            }
            config.run.jobs = jobs;
        }
        Ok(())
    }
}

/// Run every expectation and report; returns the exit code
pub fn check(args: &CheckArgs, mut config: Config, mode: OutputMode) -> anyhow::Result<u8> {
    args.apply(&mut config)?;

    let inputs = super::suite_inputs(&args.paths)?;
    let suites = toml::load_suites(&inputs)?;
    debug!("Loaded {} suite(s)", suites.len());

    let spec: TargetSpec = config.run.target.parse().map_err(anyhow::Error::msg)?;
    let accessor = adapters::connect(&spec, &config)
        .with_context(|| format!("cannot prepare target {spec}"))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    let runner = Runner::new(accessor, config.run_options());
    let report = runtime.block_on(runner.run(&suites));

    render_report(&report, mode);
    Ok(report.exit_code())
}
