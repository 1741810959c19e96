//! Ruling operations

use super::Database;
use crate::error::{LexSearchError, Result};
use crate::llm::RulingAnalysis;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

/// Ruling record from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ruling {
    pub id: i64,
    pub caption: String,
    pub decision_date: Option<String>,
    pub court: Option<String>,
    pub docket: Option<String>,
    pub subject_matter: Option<String>,
    pub process_type: Option<String>,
    pub judge: Option<String>,
    pub full_text: Option<String>,
    pub summary: Option<String>,
    pub outcome: Option<String>,
    pub source_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for creating a ruling (scraper or manual ingestion)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRuling {
    pub caption: String,
    pub decision_date: Option<String>,
    pub court: Option<String>,
    pub docket: Option<String>,
    pub subject_matter: Option<String>,
    pub process_type: Option<String>,
    pub judge: Option<String>,
    pub full_text: Option<String>,
    pub summary: Option<String>,
    pub outcome: Option<String>,
    pub source_url: Option<String>,
}

fn ruling_from_row(row: &Row<'_>) -> rusqlite::Result<Ruling> {
    Ok(Ruling {
        id: row.get(0)?,
        caption: row.get(1)?,
        decision_date: row.get(2)?,
        court: row.get(3)?,
        docket: row.get(4)?,
        subject_matter: row.get(5)?,
        process_type: row.get(6)?,
        judge: row.get(7)?,
        full_text: row.get(8)?,
        summary: row.get(9)?,
        outcome: row.get(10)?,
        source_url: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

const RULING_COLUMNS: &str = "id, caption, decision_date, court, docket, subject_matter, \
     process_type, judge, full_text, summary, outcome, source_url, created_at, updated_at";

impl Database {
    /// Insert a new ruling, returning its assigned id
    pub fn insert_ruling(&self, ruling: &NewRuling) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO rulings (caption, decision_date, court, docket, subject_matter,
                 process_type, judge, full_text, summary, outcome, source_url,
                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
            params![
                ruling.caption,
                ruling.decision_date,
                ruling.court,
                ruling.docket,
                ruling.subject_matter,
                ruling.process_type,
                ruling.judge,
                ruling.full_text,
                ruling.summary,
                ruling.outcome,
                ruling.source_url,
                now,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a ruling by id
    pub fn get_ruling(&self, id: i64) -> Result<Ruling> {
        let sql = format!("SELECT {RULING_COLUMNS} FROM rulings WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id], ruling_from_row)
            .optional()?
            .ok_or(LexSearchError::RulingNotFound(id))
    }

    /// List rulings with pagination and an optional subject-matter filter
    pub fn list_rulings(
        &self,
        limit: usize,
        offset: usize,
        subject_matter: Option<&str>,
    ) -> Result<Vec<Ruling>> {
        let sql = format!(
            "SELECT {RULING_COLUMNS} FROM rulings
             WHERE (?1 IS NULL OR subject_matter = ?1)
             ORDER BY id
             LIMIT ?2 OFFSET ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let results = stmt
            .query_map(
                params![subject_matter, limit as i64, offset as i64],
                ruling_from_row,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(results)
    }

    /// Delete a ruling (cascades to tags associations and embedding)
    pub fn delete_ruling(&self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM rulings WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(LexSearchError::RulingNotFound(id));
        }
        Ok(())
    }

    /// Count stored rulings
    pub fn count_rulings(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM rulings", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Persist the extraction output onto the ruling row.
    ///
    /// Changing these fields invalidates any stored embedding; callers are
    /// expected to re-run embedding generation afterwards.
    pub fn apply_analysis(&self, id: i64, analysis: &RulingAnalysis) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let rows = self.conn.execute(
            "UPDATE rulings
             SET summary = ?2, subject_matter = ?3, process_type = ?4,
                 outcome = ?5, updated_at = ?6
             WHERE id = ?1",
            params![
                id,
                analysis.summary,
                analysis.subject_matter,
                analysis.process_type,
                analysis.outcome,
                now,
            ],
        )?;
        if rows == 0 {
            return Err(LexSearchError::RulingNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db
    }

    #[test]
    fn test_insert_and_get_ruling() {
        let db = test_db();
        let id = db
            .insert_ruling(&NewRuling {
                caption: "Perez c/ Gomez s/ despido".to_string(),
                subject_matter: Some("LABORAL".to_string()),
                ..Default::default()
            })
            .unwrap();

        let ruling = db.get_ruling(id).unwrap();
        assert_eq!(ruling.caption, "Perez c/ Gomez s/ despido");
        assert_eq!(ruling.subject_matter.as_deref(), Some("LABORAL"));
        assert!(ruling.summary.is_none());
    }

    #[test]
    fn test_get_missing_ruling() {
        let db = test_db();
        match db.get_ruling(999) {
            Err(LexSearchError::RulingNotFound(999)) => {}
            other => panic!("expected RulingNotFound, got {:?}", other.map(|r| r.id)),
        }
    }

    #[test]
    fn test_list_rulings_filtered() {
        let db = test_db();
        for (caption, matter) in [("a", "CIVIL"), ("b", "LABORAL"), ("c", "CIVIL")] {
            db.insert_ruling(&NewRuling {
                caption: caption.to_string(),
                subject_matter: Some(matter.to_string()),
                ..Default::default()
            })
            .unwrap();
        }

        let all = db.list_rulings(10, 0, None).unwrap();
        assert_eq!(all.len(), 3);

        let civil = db.list_rulings(10, 0, Some("CIVIL")).unwrap();
        assert_eq!(civil.len(), 2);

        let page = db.list_rulings(1, 1, Some("CIVIL")).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].caption, "c");
    }

    #[test]
    fn test_delete_ruling() {
        let db = test_db();
        let id = db
            .insert_ruling(&NewRuling {
                caption: "x".to_string(),
                ..Default::default()
            })
            .unwrap();
        db.delete_ruling(id).unwrap();
        assert!(matches!(
            db.delete_ruling(id),
            Err(LexSearchError::RulingNotFound(_))
        ));
    }
}
