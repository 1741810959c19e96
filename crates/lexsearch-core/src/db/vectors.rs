//! Vector storage operations
//!
//! Embeddings are persisted as a bracketed comma-separated float literal
//! (`[f1,f2,...,fn]`) and ranked inside SQL through a registered
//! `vec_distance` scalar function computing cosine distance.

use super::Database;
use crate::error::{LexSearchError, Result};
use chrono::Utc;
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension};

/// Format a vector as the persisted bracketed literal
pub fn format_vector(embedding: &[f32]) -> String {
    let mut out = String::with_capacity(embedding.len() * 12 + 2);
    out.push('[');
    for (i, value) in embedding.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&value.to_string());
    }
    out.push(']');
    out
}

/// Parse the persisted bracketed literal back into a vector
pub fn parse_vector(text: &str) -> Result<Vec<f32>> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| {
            LexSearchError::InvalidInput(format!("Malformed vector literal: {text:.40}"))
        })?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|part| {
            part.trim().parse::<f32>().map_err(|_| {
                LexSearchError::InvalidInput(format!("Malformed vector component: {part:.40}"))
            })
        })
        .collect()
}

/// Compute cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Register `vec_distance(stored, query)` on the connection.
///
/// Cosine distance over two bracketed literals; because the metric is
/// normalized, `1 - vec_distance(...)` is a similarity in [0, 1] (negative
/// similarities are possible for opposed vectors but do not occur with the
/// non-negative embeddings the providers emit).
pub(crate) fn register_vector_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "vec_distance",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let stored: String = ctx.get(0)?;
            let query: String = ctx.get(1)?;
            let a = parse_vector(&stored)
                .map_err(|e| rusqlite::Error::UserFunctionError(Box::new(e)))?;
            let b = parse_vector(&query)
                .map_err(|e| rusqlite::Error::UserFunctionError(Box::new(e)))?;
            Ok(1.0 - cosine_similarity(&a, &b) as f64)
        },
    )?;
    Ok(())
}

impl Database {
    /// Insert or overwrite the embedding for a ruling.
    ///
    /// A single atomic upsert keyed by ruling id: regeneration overwrites,
    /// never duplicates, including under concurrent re-indexing.
    pub fn upsert_embedding(&self, ruling_id: i64, model: &str, embedding: &[f32]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let literal = format_vector(embedding);
        self.conn.execute(
            "INSERT INTO embeddings (ruling_id, embedding, model, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(ruling_id) DO UPDATE SET
                 embedding = excluded.embedding,
                 model = excluded.model,
                 created_at = excluded.created_at",
            params![ruling_id, literal, model, now],
        )?;
        Ok(())
    }

    /// Get the stored embedding and producing model for a ruling
    pub fn get_embedding(&self, ruling_id: i64) -> Result<Option<(Vec<f32>, String)>> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT embedding, model FROM embeddings WHERE ruling_id = ?1",
                params![ruling_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((literal, model)) => Ok(Some((parse_vector(&literal)?, model))),
            None => Ok(None),
        }
    }

    /// Delete the embedding for a ruling
    pub fn delete_embedding(&self, ruling_id: i64) -> Result<bool> {
        let rows = self.conn.execute(
            "DELETE FROM embeddings WHERE ruling_id = ?1",
            params![ruling_id],
        )?;
        Ok(rows > 0)
    }

    /// Ruling ids that have no stored embedding yet
    pub fn rulings_missing_embedding(&self) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT r.id FROM rulings r
             LEFT JOIN embeddings e ON e.ruling_id = r.id
             WHERE e.ruling_id IS NULL
             ORDER BY r.id",
        )?;
        let results = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    /// All ruling ids (for forced re-indexing)
    pub fn all_ruling_ids(&self) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare("SELECT id FROM rulings ORDER BY id")?;
        let results = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    /// Whether any embeddings exist
    pub fn has_embeddings(&self) -> bool {
        self.conn
            .query_row("SELECT COUNT(*) FROM embeddings", [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|count| count > 0)
            .unwrap_or(false)
    }

    /// Count stored embeddings
    pub fn count_embeddings(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM embeddings", [], |row| row.get(0))?;
        Ok(count as usize)
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
    fn test_vector_literal_roundtrip() {
        let original = vec![1.0f32, -2.5, 0.0031, 4.0e-7];
        let literal = format_vector(&original);
        assert!(literal.starts_with('[') && literal.ends_with(']'));
        let restored = parse_vector(&literal).unwrap();
        assert_eq!(original.len(), restored.len());
        for (a, b) in original.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_parse_vector_rejects_garbage() {
        assert!(parse_vector("1,2,3").is_err());
        assert!(parse_vector("[1,x,3]").is_err());
        assert!(parse_vector("[]").unwrap().is_empty());
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 0.0001);
    }

    #[test]
    fn test_store_roundtrip() {
        let db = test_db();
        let id = db
            .insert_ruling(&NewRuling {
                caption: "x".to_string(),
                ..Default::default()
            })
            .unwrap();

        let original = vec![0.25f32, -0.125, 0.333333];
        db.upsert_embedding(id, "text-embedding-3-small", &original)
            .unwrap();

        let (stored, model) = db.get_embedding(id).unwrap().unwrap();
        assert_eq!(model, "text-embedding-3-small");
        for (a, b) in original.iter().zip(stored.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_upsert_overwrites_not_duplicates() {
        let db = test_db();
        let id = db
            .insert_ruling(&NewRuling {
                caption: "x".to_string(),
                ..Default::default()
            })
            .unwrap();

        db.upsert_embedding(id, "model-a", &[1.0, 0.0]).unwrap();
        db.upsert_embedding(id, "model-b", &[0.0, 1.0]).unwrap();

        assert_eq!(db.count_embeddings().unwrap(), 1);
        let (stored, model) = db.get_embedding(id).unwrap().unwrap();
        assert_eq!(model, "model-b");
        assert_eq!(stored, vec![0.0, 1.0]);
    }

    #[test]
    fn test_rulings_missing_embedding() {
        let db = test_db();
        let a = db
            .insert_ruling(&NewRuling {
                caption: "a".to_string(),
                ..Default::default()
            })
            .unwrap();
        let b = db
            .insert_ruling(&NewRuling {
                caption: "b".to_string(),
                ..Default::default()
            })
            .unwrap();

        db.upsert_embedding(a, "m", &[1.0]).unwrap();
        assert_eq!(db.rulings_missing_embedding().unwrap(), vec![b]);
    }

    #[test]
    fn test_vec_distance_in_sql() {
        let db = test_db();
        let distance: f64 = db
            .conn
            .query_row(
                "SELECT vec_distance('[1,0]', '[0,1]')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((distance - 1.0).abs() < 1e-6);

        let zero: f64 = db
            .conn
            .query_row(
                "SELECT vec_distance('[1,0]', '[1,0]')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(zero.abs() < 1e-6);
    }
}
