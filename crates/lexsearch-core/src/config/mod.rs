//! Configuration management

use crate::error::{LexSearchError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// AI service configuration (chat + embeddings)
    #[serde(default)]
    pub ai: AiServiceConfig,
}

/// Which hosted chat-completion API the extraction client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatProvider {
    #[default]
    OpenAi,
    Anthropic,
}

impl ChatProvider {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(LexSearchError::Config(format!(
                "Unknown chat provider: {other} (expected 'openai' or 'anthropic')"
            ))),
        }
    }
}

/// AI service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiServiceConfig {
    /// Which chat API shape to use for structured extraction
    #[serde(default)]
    pub provider: ChatProvider,

    /// Base URL of the chat-completion service
    pub url: String,

    /// Model name for chat completions (ruling analysis)
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for the embeddings service (falls back to `url`)
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiServiceConfig {
    /// Get the embeddings URL (falls back to main URL if not specified)
    pub fn embeddings_url(&self) -> &str {
        self.embedding_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for AiServiceConfig {
    fn default() -> Self {
        Self {
            provider: std::env::var("LEXSEARCH_LLM_PROVIDER")
                .ok()
                .and_then(|s| ChatProvider::parse(&s).ok())
                .unwrap_or_default(),
            url: std::env::var("LEXSEARCH_LLM_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            model: default_chat_model(),
            embedding_url: std::env::var("LEXSEARCH_EMBEDDING_URL").ok(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: std::env::var("LEXSEARCH_EMBEDDING_DIMS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_embedding_dimensions),
            api_key: std::env::var("LEXSEARCH_API_KEY").ok(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("LEXSEARCH_LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("LEXSEARCH_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "text-embedding-3-small".to_string())
}

fn default_embedding_dimensions() -> usize {
    1536
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_provider_parse() {
        assert_eq!(ChatProvider::parse("openai").unwrap(), ChatProvider::OpenAi);
        assert_eq!(
            ChatProvider::parse("Anthropic").unwrap(),
            ChatProvider::Anthropic
        );
        assert!(ChatProvider::parse("mistral").is_err());
    }

    #[test]
    fn test_embeddings_url_fallback() {
        let mut config = AiServiceConfig {
            url: "http://chat.local".to_string(),
            embedding_url: None,
            ..AiServiceConfig::default()
        };
        assert_eq!(config.embeddings_url(), "http://chat.local");

        config.embedding_url = Some("http://embed.local".to_string());
        assert_eq!(config.embeddings_url(), "http://embed.local");
    }
}
