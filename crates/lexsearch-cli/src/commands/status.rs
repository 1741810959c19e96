//! Store status command

use crate::app::OutputFormat;
use anyhow::Result;
use lexsearch_core::Database;

pub async fn run(db: &Database, format: OutputFormat) -> Result<()> {
    let rulings = db.count_rulings()?;
    let tags = db.count_tags()?;
    let embeddings = db.count_embeddings()?;
    let missing = db.rulings_missing_embedding()?.len();

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::json!({
                "rulings": rulings,
                "tags": tags,
                "embeddings": embeddings,
                "missing_embeddings": missing,
            })
        );
    } else {
        println!("Rulings:            {rulings}");
        println!("Tags:               {tags}");
        println!("Embeddings:         {embeddings}");
        println!("Missing embeddings: {missing}");
    }
    Ok(())
}
