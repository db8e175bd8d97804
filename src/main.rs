use anyhow::Result;
use clap::Parser;
use par_nav::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level takes precedence, then RUST_LOG, then config (applied below).
    par_nav::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()));

    let config = cli.load_config()?;
    par_nav::debug::apply_config_level(config.log_level.to_level_filter());
    log::info!("Starting par-nav {}", par_nav::VERSION);

    if let Err(e) = cli::run(&cli, &config) {
        log::error!("{e:#}");
        eprintln!("par-nav: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
