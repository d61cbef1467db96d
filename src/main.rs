use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use studybuddy::cli::args::{Cli, Commands};
use studybuddy::cli::commands;
use studybuddy::config::{Config, Paths};
use studybuddy::focus::SessionStore;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;

    // Logging is best effort; the timer works without it.
    let _log_guard = studybuddy::logging::init(&paths).ok();

    let config = Config::load_from_path(&paths.config_file)?;
    let format = commands::effective_format(cli.output, config.general.default_output);

    let output = match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            studybuddy::tui::run(&config, &paths)?;
            String::new()
        }
        Commands::Start(args) => commands::start(&args, &config, &paths, format)?,
        Commands::History { limit } => commands::history(&open_store(&paths)?, limit, format)?,
        Commands::Report { period } => commands::report(&open_store(&paths)?, &period, format)?,
        Commands::Clear { force } => commands::clear(&open_store(&paths)?, force, format)?,
        Commands::Config(args) => commands::config(args.command, &config, &paths, format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn open_store(paths: &Paths) -> Result<SessionStore> {
    SessionStore::open(paths).with_context(|| {
        format!(
            "could not open session history at {}",
            paths.database.display()
        )
    })
}
