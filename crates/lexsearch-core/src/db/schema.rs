//! Database schema and initialization

use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::Path;

/// Main database handle
pub struct Database {
    pub(crate) conn: Connection,
}

const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = r#"
-- Judicial rulings
CREATE TABLE IF NOT EXISTS rulings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    caption TEXT NOT NULL,
    decision_date TEXT,
    court TEXT,
    docket TEXT,
    subject_matter TEXT,
    process_type TEXT,
    judge TEXT,
    full_text TEXT,
    summary TEXT,
    outcome TEXT,
    source_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Controlled/freeform labels (curated taxonomy plus model-coined tags)
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    category TEXT,
    description TEXT,
    generated INTEGER NOT NULL DEFAULT 0
);

-- Many-to-many ruling/tag association with a confidence score
CREATE TABLE IF NOT EXISTS ruling_tags (
    ruling_id INTEGER NOT NULL REFERENCES rulings(id) ON DELETE CASCADE,
    tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
    confidence REAL,
    PRIMARY KEY (ruling_id, tag_id)
);

-- One embedding per ruling, stored as a bracketed float literal
CREATE TABLE IF NOT EXISTS embeddings (
    ruling_id INTEGER PRIMARY KEY REFERENCES rulings(id) ON DELETE CASCADE,
    embedding TEXT NOT NULL,
    model TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_rulings_subject_matter ON rulings(subject_matter);
CREATE INDEX IF NOT EXISTS idx_rulings_process_type ON rulings(process_type);
CREATE INDEX IF NOT EXISTS idx_rulings_decision_date ON rulings(decision_date);
CREATE INDEX IF NOT EXISTS idx_ruling_tags_tag ON ruling_tags(tag_id);
"#;

impl Database {
    /// Open database at path, creating if necessary
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Initialize database schema and register SQL functions
    pub fn initialize(&self) -> Result<()> {
        // Set PRAGMAs for performance
        self.conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;

        self.conn.execute_batch(CREATE_TABLES)?;

        // Ranking is pushed into SQL via vec_distance()
        super::vectors::register_vector_functions(&self.conn)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }
}
