//! Structured extraction of ruling metadata via a hosted LLM

use super::json::extract_json;
use super::taxonomy::BASELINE_TAGS;
use super::{ChatMessage, LLMClient};
use crate::config::AiServiceConfig;
use crate::error::{LexSearchError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Structured record extracted from one ruling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulingAnalysis {
    /// Executive summary, at most 150 words
    pub summary: String,
    pub subject_matter: String,
    pub process_type: String,
    pub outcome: String,
    #[serde(default)]
    pub tags: Vec<ExtractedTag>,
    #[serde(default)]
    pub cited_norms: Vec<String>,
    #[serde(default)]
    pub parties: Parties,
}

/// One tag proposed by the extraction model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedTag {
    pub name: String,
    pub provenance: TagProvenance,
    pub relevance: TagRelevance,
}

/// Whether a tag came from the curated taxonomy or was coined by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagProvenance {
    Official,
    Generated,
}

/// How strongly the model believes the tag applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagRelevance {
    High,
    Medium,
}

/// Claimant/respondent pair; "No especificado" when the ruling does not say
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parties {
    #[serde(default)]
    pub claimant: String,
    #[serde(default)]
    pub respondent: String,
}

/// Structured-extraction trait
#[async_trait]
pub trait RulingAnalyzer: Send + Sync {
    /// Analyze a ruling's full text. `allowed_tags` overrides the baseline
    /// taxonomy when present.
    async fn analyze(
        &self,
        text: &str,
        allowed_tags: Option<&[String]>,
    ) -> Result<RulingAnalysis>;

    /// Get model name
    fn model_name(&self) -> &str;
}

const SYSTEM_PROMPT: &str = r#"You are a judicial clerk expert in the Argentine legal system and the jurisprudence of the Province of Jujuy.
Your task is a STRUCTURED ANALYSIS of judicial rulings for a semantic search engine.

### TAGGING RULES
1. Taxonomy priority: a list of OFFICIAL TAGS is provided. Use them whenever the concept is present, even when the ruling uses synonyms (if the ruling says "finalizacion del contrato" and "DESPIDO" is available, use "DESPIDO").
2. Controlled generation: if a KEY legal concept is missing from the official list, create a new tag in UPPERCASE, SINGULAR, without articles.
3. Quantity: select between 4 and 7 tags per ruling.
4. Fidelity: never invent facts. When a field cannot be resolved from the text, answer exactly "No especificado".

### OUTPUT FORMAT (STRICT JSON)
Respond exclusively with a JSON object of this shape:
{
  "summary": "Max 150 words. Facts, dispute, decision.",
  "subject_matter": "LABORAL | CIVIL | PENAL | FAMILIA | CONTENCIOSO",
  "process_type": "e.g. ACCION DE AMPARO",
  "outcome": "SE HACE LUGAR | RECHAZO | NULIDAD | PARCIAL",
  "tags": [
    {"name": "TAG", "provenance": "official | generated", "relevance": "high | medium"}
  ],
  "cited_norms": ["Ley 20744 Art 245", "CPCC Jujuy Art 100"],
  "parties": {"claimant": "", "respondent": ""}
}"#;

/// Extraction client backed by a hosted chat-completion endpoint
pub struct HttpAnalyzer {
    client: Arc<dyn LLMClient>,
}

impl HttpAnalyzer {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: AiServiceConfig) -> Result<Self> {
        let client = super::HttpLLMClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let client = super::HttpLLMClient::from_env()?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Build the user prompt with the official tag list and the ruling text
    fn build_user_prompt(&self, text: &str, allowed_tags: Option<&[String]>) -> String {
        let tag_lines = match allowed_tags {
            Some(tags) if !tags.is_empty() => tags
                .iter()
                .map(|t| format!("- {t}"))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => BASELINE_TAGS
                .iter()
                .map(|t| format!("- {t}"))
                .collect::<Vec<_>>()
                .join("\n"),
        };

        format!(
            r#"Process the following judicial ruling.

### AVAILABLE OFFICIAL TAGS:
{tag_lines}

### RULING TEXT:
-----------------------------------------
{text}
-----------------------------------------

Produce the JSON following the system instructions."#
        )
    }

    /// Coerce the raw response into the analysis schema
    fn parse_response(&self, raw: &str) -> Result<RulingAnalysis> {
        let value = extract_json(raw)?;
        serde_json::from_value(value).map_err(|e| {
            LexSearchError::unparsable(format!("Response does not match analysis schema: {e}"), raw)
        })
    }
}

#[async_trait]
impl RulingAnalyzer for HttpAnalyzer {
    async fn analyze(
        &self,
        text: &str,
        allowed_tags: Option<&[String]>,
    ) -> Result<RulingAnalysis> {
        if text.trim().is_empty() {
            return Err(LexSearchError::EmptyInput);
        }

        let messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(self.build_user_prompt(text, allowed_tags)),
        ];

        let response = self.client.chat_completion(messages).await?;
        self.parse_response(&response)
    }

    fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    /// Stub that fails the test if any remote call is issued
    struct PanickingClient;

    #[async_trait]
    impl LLMClient for PanickingClient {
        async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
            panic!("remote call issued for empty input");
        }
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            panic!("remote call issued for empty input");
        }
        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            panic!("remote call issued for empty input");
        }
        fn embedding_dimensions(&self) -> usize {
            0
        }
        fn model_name(&self) -> &str {
            "stub"
        }
    }

    /// Stub returning a canned chat response
    struct CannedClient(String);

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn chat_completion(&self, _messages: Vec<ChatMessage>) -> Result<String> {
            Ok(self.0.clone())
        }
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.0])
        }
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.0]).collect())
        }
        fn embedding_dimensions(&self) -> usize {
            1
        }
        fn model_name(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn test_empty_input_rejected_before_remote_call() {
        let analyzer = HttpAnalyzer::new(Arc::new(PanickingClient));
        for input in ["", "   ", "\n\t  \n"] {
            assert!(matches!(
                analyzer.analyze(input, None).await,
                Err(LexSearchError::EmptyInput)
            ));
        }
    }

    #[tokio::test]
    async fn test_parses_fenced_analysis() {
        let raw = r#"```json
{
  "summary": "Despido injustificado; se hace lugar a la demanda.",
  "subject_matter": "LABORAL",
  "process_type": "JUICIO ORDINARIO",
  "outcome": "SE HACE LUGAR",
  "tags": [
    {"name": "DESPIDO", "provenance": "official", "relevance": "high"},
    {"name": "TELETRABAJO", "provenance": "generated", "relevance": "medium"}
  ],
  "cited_norms": ["Ley 20744 Art 245"],
  "parties": {"claimant": "Perez", "respondent": "Gomez SA"}
}
```"#;
        let analyzer = HttpAnalyzer::new(Arc::new(CannedClient(raw.to_string())));
        let analysis = analyzer.analyze("texto del fallo", None).await.unwrap();

        assert_eq!(analysis.subject_matter, "LABORAL");
        assert_eq!(analysis.tags.len(), 2);
        assert_eq!(analysis.tags[0].provenance, TagProvenance::Official);
        assert_eq!(analysis.tags[1].relevance, TagRelevance::Medium);
        assert_eq!(analysis.parties.respondent, "Gomez SA");
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_unparsable() {
        let analyzer = HttpAnalyzer::new(Arc::new(CannedClient(
            "{\"unexpected\": true}".to_string(),
        )));
        assert!(matches!(
            analyzer.analyze("texto", None).await,
            Err(LexSearchError::UnparsableResponse { .. })
        ));
    }

    #[test]
    fn test_prompt_prefers_supplied_tags() {
        let analyzer = HttpAnalyzer::new(Arc::new(PanickingClient));
        let supplied = vec!["USURPACION".to_string()];
        let prompt = analyzer.build_user_prompt("texto", Some(&supplied));
        assert!(prompt.contains("- USURPACION"));
        assert!(!prompt.contains("- DESPIDO"));

        let baseline = analyzer.build_user_prompt("texto", None);
        assert!(baseline.contains("- DESPIDO"));
    }
}
