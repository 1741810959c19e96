//! Ingestion and indexing pipeline
//!
//! A ruling's searchable document is the concatenation of its caption,
//! AI summary, and tag names. Changing any of those invalidates the
//! stored embedding; re-running [`embed_ruling`] is the explicit
//! re-index trigger (there is no automatic invalidation).

use crate::db::{Database, Ruling, Tag};
use crate::error::Result;
use crate::llm::{Embedder, RulingAnalysis, RulingAnalyzer};

/// Outcome of a batch embedding run
#[derive(Debug, Clone, Default)]
pub struct EmbedStats {
    pub total: usize,
    pub embedded: usize,
    pub failed: usize,
}

/// Build the text a ruling is embedded from
pub fn build_search_document(ruling: &Ruling, tags: &[Tag]) -> String {
    let mut doc = format!("{}\n\n", ruling.caption);

    if let Some(ref summary) = ruling.summary {
        doc.push_str(summary);
        doc.push_str("\n\n");
    }

    if !tags.is_empty() {
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        doc.push_str(&format!("Etiquetas: {}\n\n", names.join(", ")));
    }

    doc
}

/// Generate and store the embedding for one ruling (overwrites any
/// previous embedding for that ruling)
pub async fn embed_ruling(db: &Database, embedder: &dyn Embedder, ruling_id: i64) -> Result<()> {
    let ruling = db.get_ruling(ruling_id)?;
    let tags: Vec<Tag> = db
        .tags_for_ruling(ruling_id)?
        .into_iter()
        .map(|(tag, _)| tag)
        .collect();

    let document = build_search_document(&ruling, &tags);
    let embedding = embedder.embed(&document).await?;

    db.upsert_embedding(ruling_id, embedder.model_name(), &embedding)?;
    tracing::info!(ruling_id, model = embedder.model_name(), "Embedded ruling");
    Ok(())
}

/// Embed every ruling that has no stored embedding yet
pub async fn embed_missing(db: &Database, embedder: &dyn Embedder) -> Result<EmbedStats> {
    embed_ids(db, embedder, db.rulings_missing_embedding()?).await
}

/// Re-embed every ruling (forced re-index)
pub async fn embed_all(db: &Database, embedder: &dyn Embedder) -> Result<EmbedStats> {
    embed_ids(db, embedder, db.all_ruling_ids()?).await
}

async fn embed_ids(db: &Database, embedder: &dyn Embedder, ids: Vec<i64>) -> Result<EmbedStats> {
    let mut stats = EmbedStats {
        total: ids.len(),
        ..Default::default()
    };

    for id in ids {
        match embed_ruling(db, embedder, id).await {
            Ok(()) => stats.embedded += 1,
            Err(e) => {
                tracing::warn!(ruling_id = id, "Embedding failed: {e}");
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

/// Full processing pipeline for one ruling: analyze the full text,
/// persist summary/categories/tags, then (re)generate the embedding.
/// Aborts on the first error; nothing is retried.
pub async fn process_ruling(
    db: &Database,
    analyzer: &dyn RulingAnalyzer,
    embedder: &dyn Embedder,
    ruling_id: i64,
) -> Result<RulingAnalysis> {
    let ruling = db.get_ruling(ruling_id)?;
    let text = ruling.full_text.unwrap_or_default();

    // Prefer the curated tags already in the store over the built-in baseline
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

    db.apply_analysis(ruling_id, &analysis)?;
    db.store_analysis_tags(ruling_id, &analysis.tags)?;
    embed_ruling(db, embedder, ruling_id).await?;

    tracing::info!(
        ruling_id,
        subject_matter = %analysis.subject_matter,
        tag_count = analysis.tags.len(),
        "Processed ruling"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewRuling;

    fn ruling(caption: &str, summary: Option<&str>) -> Ruling {
        Ruling {
            id: 1,
            caption: caption.to_string(),
            decision_date: None,
            court: None,
            docket: None,
            subject_matter: None,
            process_type: None,
            judge: None,
            full_text: None,
            summary: summary.map(str::to_string),
            outcome: None,
            source_url: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn tag(name: &str) -> Tag {
        Tag {
            id: 0,
            name: name.to_string(),
            category: None,
            description: None,
            generated: false,
        }
    }

    #[test]
    fn test_search_document_concatenation() {
        let doc = build_search_document(
            &ruling("Perez c/ Gomez", Some("Resumen del fallo.")),
            &[tag("DESPIDO"), tag("PREAVISO")],
        );
        assert!(doc.starts_with("Perez c/ Gomez\n\n"));
        assert!(doc.contains("Resumen del fallo.\n\n"));
        assert!(doc.contains("Etiquetas: DESPIDO, PREAVISO"));
    }

    #[test]
    fn test_search_document_without_summary_or_tags() {
        let doc = build_search_document(&ruling("Caption only", None), &[]);
        assert_eq!(doc, "Caption only\n\n");
    }

    #[test]
    fn test_missing_ruling_propagates() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db.insert_ruling(&NewRuling {
            caption: "x".to_string(),
            ..Default::default()
        })
        .unwrap();

        // Sanity check the id set the batch helpers operate on
        assert_eq!(db.rulings_missing_embedding().unwrap(), vec![1]);
    }
}
