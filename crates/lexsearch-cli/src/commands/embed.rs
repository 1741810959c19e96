//! Embedding generation commands

use crate::app::EmbedArgs;
use anyhow::Result;
use lexsearch_core::{embed_all, embed_missing, embed_ruling, Config, Database, HttpEmbedder};

pub async fn run(args: EmbedArgs, db: &Database) -> Result<()> {
    let config = Config::load()?;
    let embedder = HttpEmbedder::from_config(config.ai)?;

    if let Some(id) = args.id {
        embed_ruling(db, &embedder, id).await?;
        println!("Embedded ruling #{id}");
        return Ok(());
    }

    let stats = if args.all {
        embed_all(db, &embedder).await?
    } else {
        // default to catching up on missing embeddings
        embed_missing(db, &embedder).await?
    };

    println!(
        "Embedded {}/{} ruling(s), {} failed",
        stats.embedded, stats.total, stats.failed
    );
    Ok(())
}
