//! Search commands

use crate::app::{OutputFormat, QueryArgs, SearchArgs};
use crate::output;
use anyhow::Result;
use lexsearch_core::{Config, Database, HttpEmbedder, SearchFilters};

pub async fn run_semantic(args: SearchArgs, db: &Database, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    let config = Config::load()?;
    let embedder = HttpEmbedder::from_config(config.ai)?;

    let results = db
        .search_semantic(
            &query,
            &embedder,
            args.limit,
            args.subject_matter.as_deref(),
            args.process_type.as_deref(),
        )
        .await?;

    output::print_search_results(&results, format)
}

pub async fn run_hybrid(args: QueryArgs, db: &Database, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    let config = Config::load()?;
    let embedder = HttpEmbedder::from_config(config.ai)?;

    let filters = SearchFilters {
        subject_matter: args.subject_matter,
        process_type: args.process_type,
        tags: args.tags,
        date_from: args.from,
        date_to: args.to,
    };

    let results = db
        .search_hybrid(&query, &embedder, &filters, args.limit)
        .await?;

    output::print_search_results(&results, format)
}
