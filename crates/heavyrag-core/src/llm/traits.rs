//! Service trait definitions

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Text generation trait
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a prompt with the given decoding parameters
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Knowledge base retrieval trait
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Fetch ranked passages for a query
    async fn retrieve(&self, request: &RetrievalRequest) -> Result<Vec<RetrievedPassage>>;
}

/// Decoding parameters for a generation call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl GenerationConfig {
    /// Deterministic, single-token decoding for label classification
    pub fn classification() -> Self {
        Self {
            max_tokens: 3,
            temperature: 0.0,
            top_p: 0.1,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Search mode requested from the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchType {
    /// Vector similarity combined with lexical matching
    Hybrid,
}

/// A single retrieval call
#[derive(Debug, Clone)]
pub struct RetrievalRequest {
    pub query: String,
    pub store_id: String,
    pub max_results: usize,
    pub search_type: SearchType,
}

/// One knowledge base hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub content: String,
    /// Higher is more relevant; the range is up to the store
    pub score: f64,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl RetrievedPassage {
    pub fn new(content: impl Into<String>, score: f64) -> Self {
        Self {
            content: content.into(),
            score,
            metadata: serde_json::Map::new(),
        }
    }
}
