//! Lexsearch CLI
//!
//! Store, analyze, embed, and search judicial rulings.

use anyhow::Result;
use clap::Parser;
use lexsearch_core::Database;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Open database (use LEXSEARCH_DB env var if set, otherwise use default)
    let db_path = std::env::var("LEXSEARCH_DB")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| Database::default_path());
    let db = Database::open(&db_path)?;
    db.initialize()?;

    let result = match cli.command {
        Commands::Ruling(args) => commands::ruling::run(args, &db, cli.format).await,
        Commands::Tags(args) => commands::tags::run(args, &db, cli.format).await,
        Commands::Analyze(args) => commands::analyze::run_analyze(args, &db, cli.format).await,
        Commands::Process(args) => commands::analyze::run_process(args, &db, cli.format).await,
        Commands::Embed(args) => commands::embed::run(args, &db).await,
        Commands::Search(args) => commands::search::run_semantic(args, &db, cli.format).await,
        Commands::Query(args) => commands::search::run_hybrid(args, &db, cli.format).await,
        Commands::Status => commands::status::run(&db, cli.format).await,
    };

    if let Err(ref e) = result {
        if let Some(core_err) = e.downcast_ref::<lexsearch_core::LexSearchError>() {
            eprintln!("Error: {core_err}");
            std::process::exit(core_err.exit_code());
        }
    }

    result
}
