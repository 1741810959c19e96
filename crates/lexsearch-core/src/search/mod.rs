//! Search module
//!
//! Hybrid query composition: parameterized SQL filters plus vector
//! similarity ranking, evaluated in a single statement.

mod query;
mod vector;

pub use query::{compose_where, Predicate, SearchFilters};

use serde::{Deserialize, Serialize};

/// One ranked search result row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub caption: String,
    /// AI-generated summary
    pub summary: Option<String>,
    pub decision_date: Option<String>,
    pub court: Option<String>,
    pub subject_matter: Option<String>,
    /// `1 - cosine distance`, higher is closer
    pub similarity: f64,
}
