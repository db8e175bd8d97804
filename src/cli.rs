//! Command-line interface for par-nav.
//!
//! `replay` drives the navigation core from a scripted scenario; `config`
//! prints the effective configuration.

use crate::scenario::{self, Replay, ReplayReport};
use crate::session::{self, storage};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use par_nav_config::Config;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

/// par-nav - navigation, tab and keep-alive core for admin panels
#[derive(Parser)]
#[command(name = "par-nav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Load configuration from this file instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a YAML scenario and print the tab strip after each step
    Replay {
        /// Scenario file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as YAML
    Config,
}

impl Cli {
    /// Load the config named by `--config`, or the default one
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

/// Run the parsed subcommand
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Replay { file, json } => replay(file, *json, config),
        Commands::Config => {
            let yaml =
                serde_yaml_ng::to_string(config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
            Ok(())
        }
    }
}

fn replay(file: &Path, json: bool, config: &Config) -> Result<()> {
    let steps = scenario::load_steps(file)?;
    log::info!("Replaying {} steps from {:?}", steps.len(), file);

    let runtime = Runtime::new().context("Failed to start tokio runtime")?;
    let report = runtime.block_on(async {
        let replay = Replay::new(config);
        let session_file = config.session.restore_tabs.then(|| config.session_path());
        if let Some(path) = &session_file {
            match storage::load_session_from(path) {
                Ok(Some(state)) => session::restore(replay.navigator().tabs(), &state),
                Ok(None) => log::info!("No saved session at {:?}", path),
                Err(e) => log::warn!("Ignoring saved session: {e:#}"),
            }
        }

        let report = replay.run(&steps).await;

        if let Some(path) = &session_file
            && let Err(e) =
                storage::save_session_to(&session::capture(replay.navigator().tabs()), path)
        {
            log::warn!("Failed to save session: {e:#}");
        }
        report
    });

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", out);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ReplayReport) {
    for step in &report.steps {
        println!("{:>3}. {:?}", step.index + 1, step.step);
        println!("     {}", step.outcome);
        for call in &step.host_calls {
            println!("     host: {:?}", call);
        }
        if let Some(label) = &step.pending {
            println!("     pending: {}", label);
        }
        println!("     {}", scenario::render_strip(&step.tabs));
    }
    println!();
    println!("Final: {}", scenario::render_strip(&report.tabs));
    if report.cached_paths.is_empty() {
        println!("Cached pages: none");
    } else {
        println!("Cached pages: {}", report.cached_paths.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "par-nav",
            "replay",
            "demo.yaml",
            "--json",
            "--log-level",
            "debug",
            "--config",
            "custom.yaml",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Replay { json: true, .. }));
        assert_eq!(
            cli.log_level.map(LogLevelArg::to_level_filter),
            Some(log::LevelFilter::Debug)
        );
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn replay_requires_file() {
        assert!(Cli::try_parse_from(["par-nav", "replay"]).is_err());
    }
}
