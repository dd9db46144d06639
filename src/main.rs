mod commands;
mod config;
mod db;
mod dictionary;
mod guesser;
mod importer;
mod models;
mod utils;

use std::{io, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Word list importer and candidate finder for Wordle-style games
#[derive(Parser)]
#[command(name = "wordle-helper")]
#[command(version)]
#[command(about = "Import rated word lists and filter guess candidates")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a word list file under a new name
    Import(commands::import::ImportArgs),
    /// Print the best rated words of one length
    Read(commands::read::ReadArgs),
    /// Show all imported word lists
    Lists,
    /// Print the words matching what previous guesses revealed
    Guess(commands::guess::GuessArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("wordle_helper=info"),
        2 => EnvFilter::new("wordle_helper=debug,sqlx=info"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::debug!("Configuration loaded");

    // Connect to database
    let db = db::create_pool(config.database_url(), config.database.max_connections).await?;
    tracing::info!("Connected to database");

    // Run migrations
    db::run_migrations(&db).await?;
    tracing::debug!("Database migrations completed");

    let mut stdout = io::stdout().lock();
    let code = match &cli.command {
        Commands::Import(args) => commands::import::run(args, &db, &mut stdout).await?,
        Commands::Read(args) => {
            commands::read::run(args, &db, config.guess.result_limit, &mut stdout).await?
        }
        Commands::Lists => commands::lists::run(&db, &mut stdout).await?,
        Commands::Guess(args) => commands::guess::run(args, &db, &config, &mut stdout).await?,
    };

    db.close().await;

    Ok(code.into())
}
