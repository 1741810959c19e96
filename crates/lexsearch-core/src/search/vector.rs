//! Semantic and hybrid search over stored rulings
//!
//! The query composer: vectorize the query, push every present filter into
//! the WHERE clause of one SQL statement, rank by the store's registered
//! vector distance function, truncate to the limit. Filtering before
//! ranking guarantees a full page of rows satisfying the filters rather
//! than post-filtering an already-ranked candidate set.

use super::query::{compose_where, Predicate, SearchFilters};
use super::SearchResult;
use crate::db::{format_vector, Database};
use crate::error::{LexSearchError, Result};
use crate::llm::Embedder;
use rusqlite::types::Value;

impl Database {
    /// Semantic search: vector ranking with optional exact-match filters
    pub async fn search_semantic(
        &self,
        query: &str,
        embedder: &dyn Embedder,
        limit: usize,
        subject_matter: Option<&str>,
        process_type: Option<&str>,
    ) -> Result<Vec<SearchResult>> {
        let filters = SearchFilters {
            subject_matter: subject_matter.map(str::to_string),
            process_type: process_type.map(str::to_string),
            ..Default::default()
        };
        self.search_hybrid(query, embedder, &filters, limit).await
    }

    /// Hybrid search: conjunctive SQL filters applied before vector ranking.
    ///
    /// Read-only. Results are ordered by descending similarity
    /// (`1 - cosine distance`, in [0, 1] for the embeddings the providers
    /// emit), ties broken by ruling id ascending so pages are stable.
    pub async fn search_hybrid(
        &self,
        query: &str,
        embedder: &dyn Embedder,
        filters: &SearchFilters,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let query_embedding = embedder
            .embed(query)
            .await
            .map_err(|e| LexSearchError::EmbeddingUnavailable(e.to_string()))?;
        if query_embedding.is_empty() || query_embedding.iter().any(|v| !v.is_finite()) {
            return Err(LexSearchError::EmbeddingUnavailable(
                "provider returned a malformed vector".to_string(),
            ));
        }

        let (where_clause, filter_params) =
            compose_where(&Predicate::from_filters(filters));

        tracing::debug!(limit, %where_clause, "Running hybrid search");

        let sql = format!(
            "SELECT r.id, r.caption, r.summary, r.decision_date, r.court, r.subject_matter,
                    1.0 - vec_distance(e.embedding, ?) AS similarity
             FROM rulings r
             JOIN embeddings e ON e.ruling_id = r.id
             WHERE {where_clause}
             ORDER BY similarity DESC, r.id ASC
             LIMIT ?"
        );

        let mut params: Vec<Value> = Vec::with_capacity(filter_params.len() + 2);
        params.push(Value::Text(format_vector(&query_embedding)));
        params.extend(filter_params);
        params.push(Value::Integer(limit as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let results = stmt
            .query_map(rusqlite::params_from_iter(params), |row| {
                Ok(SearchResult {
                    id: row.get(0)?,
                    caption: row.get(1)?,
                    summary: row.get(2)?,
                    decision_date: row.get(3)?,
                    court: row.get(4)?,
                    subject_matter: row.get(5)?,
                    similarity: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(results)
    }
}
