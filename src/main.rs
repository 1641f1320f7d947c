use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use studynest::cli::args::{Cli, Commands};
use studynest::cli::commands;
use studynest::config::{Config, Paths};
use studynest::core::logging::enable_logging;
use studynest::core::SystemClock;
use studynest::error::StudyNestError;
use studynest::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        let code = e
            .downcast_ref::<StudyNestError>()
            .map_or(1, StudyNestError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Completions need no data directory.
    if let Commands::Completions { shell, install } = cli.command {
        println!("{}", commands::completions(shell, install)?);
        return Ok(());
    }

    let paths = Paths::resolve(cli.data_dir.clone())?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    enable_logging(&paths.logs, &config.logging.level, cli.verbose)
        .context("failed to start logging")?;

    let format = cli.output.unwrap_or(config.general.default_output);
    let store = Database::open_at(&paths.database)
        .with_context(|| format!("failed to open {}", paths.database.display()))?;
    let clock = SystemClock;
    tracing::debug!(
        root = %paths.root.display(),
        schema = store.schema_version()?,
        keys = ?store.keys()?,
        "database opened"
    );

    let output = match cli.command {
        Commands::Timer(args) => commands::timer(&store, &clock, args.command, format)?,
        Commands::Focus => {
            studynest::tui::run(&store, &clock)?;
            String::new()
        }
        Commands::Task(args) => commands::task(&store, &clock, args.command, format)?,
        Commands::Stats(args) => commands::stats(&store, &clock, args.command, format)?,
        Commands::Settings(args) => commands::settings(&store, args.command, format)?,
        Commands::Export { out } => commands::export(&store, &clock, &paths.backups, out, format)?,
        Commands::Import { path } => commands::import(&store, &path, format)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
