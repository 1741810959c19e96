//! Extraction commands: analyze and the full processing pipeline

use crate::app::{AnalyzeArgs, OutputFormat};
use crate::output;
use anyhow::Result;
use lexsearch_core::llm::RulingAnalyzer;
use lexsearch_core::{process_ruling, Config, Database, HttpAnalyzer, HttpEmbedder};

/// Analyze a ruling's full text and persist the extracted metadata.
/// Does not touch the embedding; run `embed` afterwards (or use `process`).
pub async fn run_analyze(args: AnalyzeArgs, db: &Database, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let analyzer = HttpAnalyzer::from_config(config.ai)?;

    let ruling = db.get_ruling(args.id)?;
    let text = ruling.full_text.unwrap_or_default();

    let official: Vec<String> = db
        .list_tags(None)?
        .into_iter()
        .filter(|t| !t.generated)
        .map(|t| t.name)
        .collect();
    let allowed = if official.is_empty() {
        None
    } else {
        Some(official.as_slice())
    };

    let analysis = analyzer.analyze(&text, allowed).await?;

    db.apply_analysis(args.id, &analysis)?;
    db.store_analysis_tags(args.id, &analysis.tags)?;

    output::print_analysis(&analysis, format)?;
    if format == OutputFormat::Cli {
        println!("\nStored. Run `lexsearch embed {}` to refresh the embedding.", args.id);
    }
    Ok(())
}

/// Analyze and re-embed in one step
pub async fn run_process(args: AnalyzeArgs, db: &Database, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let analyzer = HttpAnalyzer::from_config(config.ai.clone())?;
    let embedder = HttpEmbedder::from_config(config.ai)?;

    let analysis = process_ruling(db, &analyzer, &embedder, args.id).await?;

    output::print_analysis(&analysis, format)?;
    if format == OutputFormat::Cli {
        println!("\nRuling #{} analyzed and embedded.", args.id);
    }
    Ok(())
}
