use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wurmlog_cli::commands::{dates, rate, report, sessions, watch};
use wurmlog_cli::{Cli, Commands, Config};

/// Load configuration, honoring an alternate `--config` path.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Dates { log }) => {
            // Dates doesn't need config - just reads the log
            dates::run(&mut stdout, log)?;
        }
        Some(Commands::Sessions(args)) => {
            let config = load_config(cli.config.as_deref())?;
            sessions::run(&mut stdout, args, &config)?;
        }
        Some(Commands::Report(args)) => {
            let config = load_config(cli.config.as_deref())?;
            report::run(&mut stdout, args, &config)?;
        }
        Some(Commands::Rate(args)) => {
            let config = load_config(cli.config.as_deref())?;
            rate::run(&mut stdout, args, &config)?;
        }
        Some(Commands::Watch(args)) => {
            let config = load_config(cli.config.as_deref())?;
            watch::run(&mut stdout, args, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
