//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{self, CheckArgs};
use unitspec::config::Config;
use unitspec::core::models::exit_code;
use unitspec::output::OutputMode;

/// unitspec - Declarative checks for systemd units and services
#[derive(Parser, Debug)]
#[command(
    name = "unitspec",
    version,
    about = "Declarative checks for systemd units and services",
    long_about = "Verify services and unit files on a target host.\n\n\
                  Suites declare what should be true (installed, enabled, running,\n\
                  owner, mode, content). Every expectation is reported as pass,\n\
                  fail or error."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ~/.config/unitspec/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate suites against a target
    Check {
        /// Suite files, directories or glob patterns
        paths: Vec<String>,

        /// Target: local, ssh://[user@]host[:port] or fixture:PATH
        #[arg(short, long)]
        target: Option<String>,

        /// Bound on the whole run, in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Bound on each target access, in seconds
        #[arg(long, value_name = "SECS")]
        accessor_timeout: Option<u64>,

        /// Expectations evaluated concurrently
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List suites and their expectations without evaluating them
    List {
        /// Suite files, directories or glob patterns
        paths: Vec<String>,
    },

    /// Write a starter suite
    Init {
        /// Suite directory (defaults to test/integration)
        dir: Option<PathBuf>,

        /// Service the starter suite checks
        #[arg(short, long, default_value = "test-service")]
        service: String,

        /// Overwrite an existing suite
        #[arg(short, long)]
        force: bool,
    },

    /// Show version
    Version,
}

/// Run the CLI and return the process exit code
pub fn run() -> anyhow::Result<u8> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    match cli.command {
        Some(Command::Check {
            paths,
            target,
            timeout,
            accessor_timeout,
            jobs,
        }) => {
            let args = CheckArgs {
                paths,
                target,
                timeout,
                accessor_timeout,
                jobs,
            };
            commands::check(&args, config, output_mode)
        },
        Some(Command::List { paths }) => commands::list(&paths, output_mode),
        Some(Command::Init {
            dir,
            service,
            force,
        }) => commands::init(dir, &service, force, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("unitspec v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(exit_code::SUCCESS)
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("unitspec v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'unitspec --help' for usage");
                println!("Run 'unitspec init' to get started");
            }
            Ok(exit_code::SUCCESS)
        },
    }
}
