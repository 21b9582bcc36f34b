use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bt_cli::commands::{chart, record, status, today, undo};
use bt_cli::{Cli, Commands, Config};
use bt_core::{SystemClock, UserInitial};
use bt_store::{EventStore, Tracker};

/// Load config and bind the event store to the configured timezone.
fn open_tracker(
    config_path: Option<&Path>,
    user: Option<&str>,
) -> Result<(Tracker<SystemClock>, Config)> {
    let mut config = Config::load_from(config_path).context("failed to load configuration")?;
    if let Some(user) = user {
        config.user = Some(user.to_string());
    }
    tracing::debug!(?config, "loaded configuration");

    let tz = config.tz()?;
    let tracker = Tracker::new(EventStore::new(&config.data_path), SystemClock::new(tz));
    Ok((tracker, config))
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
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (tracker, config) = open_tracker(cli.config.as_deref(), cli.user.as_deref())?;
    let user = UserInitial::from_name(config.user.as_deref());
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Feed { amount, at } => {
            record::feed(&mut stdout, &tracker, amount, at.as_deref(), user)?;
        }
        Commands::Diaper { kind } => record::diaper(&mut stdout, &tracker, kind, user)?,
        Commands::Temp { value } => record::temp(&mut stdout, &tracker, value, user)?,
        Commands::Today => today::run(&mut stdout, &tracker)?,
        Commands::Undo { kind } => undo::run(&mut stdout, &tracker, kind)?,
        Commands::Chart { range, json, out } => {
            chart::run(&mut stdout, &tracker, (*range).into(), *json, out.as_deref())?;
        }
        Commands::Status => status::run(&mut stdout, &tracker)?,
    }

    Ok(())
}
