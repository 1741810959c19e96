//! Tag operations

use super::Database;
use crate::error::Result;
use crate::llm::{ExtractedTag, TagProvenance, TagRelevance};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

/// Tag record from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    /// False for officially-curated taxonomy entries, true for model-coined tags
    pub generated: bool,
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        generated: row.get::<_, i64>(4)? != 0,
    })
}

impl Database {
    /// Get or create a tag by its unique name, returning its id.
    ///
    /// An existing tag keeps its curated/generated flag; the flag only
    /// applies when the tag is first created.
    pub fn ensure_tag(&self, name: &str, generated: bool) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tags (name, generated) VALUES (?1, ?2)
             ON CONFLICT(name) DO NOTHING",
            params![name, generated as i64],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM tags WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// List tags, optionally restricted to one category
    pub fn list_tags(&self, category: Option<&str>) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category, description, generated FROM tags
             WHERE (?1 IS NULL OR category = ?1)
             ORDER BY name",
        )?;
        let results = stmt
            .query_map(params![category], tag_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    /// List distinct tag categories
    pub fn list_tag_categories(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT category FROM tags WHERE category IS NOT NULL ORDER BY category",
        )?;
        let results = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    /// Tags associated with a ruling, with their confidence scores
    pub fn tags_for_ruling(&self, ruling_id: i64) -> Result<Vec<(Tag, Option<f64>)>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.id, t.name, t.category, t.description, t.generated, rt.confidence
             FROM ruling_tags rt
             JOIN tags t ON t.id = rt.tag_id
             WHERE rt.ruling_id = ?1
             ORDER BY rt.confidence DESC, t.name",
        )?;
        let results = stmt
            .query_map(params![ruling_id], |row| {
                Ok((tag_from_row(row)?, row.get(5)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    /// Associate a tag with a ruling; re-attaching updates the confidence
    pub fn attach_tag(&self, ruling_id: i64, tag_id: i64, confidence: Option<f64>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ruling_tags (ruling_id, tag_id, confidence) VALUES (?1, ?2, ?3)
             ON CONFLICT(ruling_id, tag_id) DO UPDATE SET confidence = excluded.confidence",
            params![ruling_id, tag_id, confidence],
        )?;
        Ok(())
    }

    /// Persist the tag list produced by the extraction client
    pub fn store_analysis_tags(&self, ruling_id: i64, tags: &[ExtractedTag]) -> Result<()> {
        for tag in tags {
            let generated = tag.provenance == TagProvenance::Generated;
            let tag_id = self.ensure_tag(&tag.name, generated)?;
            self.attach_tag(ruling_id, tag_id, Some(tag.relevance.confidence()))?;
        }
        Ok(())
    }

    /// Count stored tags
    pub fn count_tags(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl TagRelevance {
    /// Map the extraction relevance bucket to a stored confidence score
    pub fn confidence(&self) -> f64 {
        match self {
            TagRelevance::High => 0.9,
            TagRelevance::Medium => 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewRuling;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn test_ensure_tag_is_idempotent() {
        let db = test_db();
        let a = db.ensure_tag("DESPIDO", false).unwrap();
        let b = db.ensure_tag("DESPIDO", true).unwrap();
        assert_eq!(a, b);

        // The curated flag from first creation wins
        let tags = db.list_tags(None).unwrap();
        assert_eq!(tags.len(), 1);
        assert!(!tags[0].generated);
    }

    #[test]
    fn test_attach_tag_updates_confidence() {
        let db = test_db();
        let ruling_id = db
            .insert_ruling(&NewRuling {
                caption: "x".to_string(),
                ..Default::default()
            })
            .unwrap();
        let tag_id = db.ensure_tag("NULIDAD", false).unwrap();

        db.attach_tag(ruling_id, tag_id, Some(0.6)).unwrap();
        db.attach_tag(ruling_id, tag_id, Some(0.9)).unwrap();

        let tags = db.tags_for_ruling(ruling_id).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].1, Some(0.9));
    }

    #[test]
    fn test_store_analysis_tags() {
        let db = test_db();
        let ruling_id = db
            .insert_ruling(&NewRuling {
                caption: "x".to_string(),
                ..Default::default()
            })
            .unwrap();

        let extracted = vec![
            ExtractedTag {
                name: "DESPIDO".to_string(),
                provenance: TagProvenance::Official,
                relevance: TagRelevance::High,
            },
            ExtractedTag {
                name: "TELETRABAJO".to_string(),
                provenance: TagProvenance::Generated,
                relevance: TagRelevance::Medium,
            },
        ];
        db.store_analysis_tags(ruling_id, &extracted).unwrap();

        let tags = db.tags_for_ruling(ruling_id).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].0.name, "DESPIDO");
        assert_eq!(tags[0].1, Some(0.9));
        assert!(tags[1].0.generated);
    }
}
