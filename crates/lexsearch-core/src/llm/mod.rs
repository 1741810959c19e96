//! Remote AI clients: chat-based extraction and text embeddings

mod client;
mod embedder;
mod extractor;
pub mod json;
pub mod taxonomy;

pub use client::{ChatMessage, HttpLLMClient, LLMClient};
pub use embedder::{Embedder, HttpEmbedder};
pub use extractor::{
    ExtractedTag, HttpAnalyzer, Parties, RulingAnalysis, RulingAnalyzer, TagProvenance,
    TagRelevance,
};
pub use json::extract_json;
