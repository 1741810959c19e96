//! Lexsearch Core Library
//!
//! Backend core for a legal-ruling search tool.
//!
//! # Features
//! - SQLite storage for rulings, tags, and per-ruling embeddings
//! - Structured extraction of ruling metadata via hosted LLMs
//!   (OpenAI- or Anthropic-shaped chat APIs)
//! - Embeddings via an OpenAI-compatible embedding service
//! - Hybrid search: parameterized SQL filters plus vector similarity
//!   ranking in one statement

pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod llm;
pub mod search;

pub use config::{AiServiceConfig, ChatProvider, Config};
pub use db::{Database, NewRuling, Ruling, Tag};
pub use error::{Error, LexSearchError, Result};
pub use index::{build_search_document, embed_all, embed_missing, embed_ruling, process_ruling,
    EmbedStats};
pub use llm::{
    extract_json, ChatMessage, Embedder, ExtractedTag, HttpAnalyzer, HttpEmbedder, HttpLLMClient,
    LLMClient, Parties, RulingAnalysis, RulingAnalyzer, TagProvenance, TagRelevance,
};
pub use search::{SearchFilters, SearchResult};

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "lexsearch";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "lexsearch";
