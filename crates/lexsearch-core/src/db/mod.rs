//! Database layer for lexsearch
//!
//! SQLite-based storage for rulings, tags, and per-ruling embeddings.
//! Vector distance is evaluated inside SQL via a registered scalar
//! function so filtering and ranking happen in one statement.

mod rulings;
mod schema;
mod tags;
pub mod vectors;

pub use rulings::{NewRuling, Ruling};
pub use schema::Database;
pub use tags::Tag;
pub use vectors::{cosine_similarity, format_vector, parse_vector};

use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("lexsearch.sqlite")
    }
}
