//! HTTP client for the managed knowledge base retrieval service

use super::{KnowledgeStore, RetrievalRequest, RetrievedPassage, SearchType};
use crate::config::ServiceConfig;
use crate::error::{RagError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Knowledge base client speaking the `retrieve` API
pub struct BedrockKnowledgeBase {
    http_client: reqwest::Client,
    config: ServiceConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveRequest<'a> {
    retrieval_query: RetrievalQuery<'a>,
    retrieval_configuration: RetrievalConfiguration,
}

#[derive(Serialize)]
struct RetrievalQuery<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfiguration {
    vector_search_configuration: VectorSearchConfiguration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VectorSearchConfiguration {
    number_of_results: usize,
    override_search_type: SearchType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveResponse {
    #[serde(default)]
    retrieval_results: Vec<RetrievalResult>,
}

#[derive(Deserialize)]
struct RetrievalResult {
    #[serde(default)]
    content: ResultContent,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Deserialize, Default)]
struct ResultContent {
    #[serde(default)]
    text: String,
}

impl From<RetrievalResult> for RetrievedPassage {
    fn from(result: RetrievalResult) -> Self {
        Self {
            content: result.content.text,
            score: result.score,
            metadata: result.metadata.unwrap_or_default(),
        }
    }
}

impl BedrockKnowledgeBase {
    /// Create new client from configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(RagError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl KnowledgeStore for BedrockKnowledgeBase {
    async fn retrieve(&self, request: &RetrievalRequest) -> Result<Vec<RetrievedPassage>> {
        if request.store_id.trim().is_empty() {
            return Err(RagError::InvalidInput(
                "knowledge base id must not be empty".to_string(),
            ));
        }

        let body = RetrieveRequest {
            retrieval_query: RetrievalQuery {
                text: &request.query,
            },
            retrieval_configuration: RetrievalConfiguration {
                vector_search_configuration: VectorSearchConfiguration {
                    number_of_results: request.max_results,
                    override_search_type: request.search_type,
                },
            },
        };

        let url = format!(
            "{}/knowledgebases/{}/retrieve",
            self.config.agent_runtime_url(),
            request.store_id
        );

        let mut req = self.http_client.post(&url).json(&body);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Service { status, body });
        }

        let retrieve_response: RetrieveResponse = response.json().await?;

        tracing::debug!(
            "Knowledge base {} returned {} results",
            request.store_id,
            retrieve_response.retrieval_results.len()
        );

        Ok(retrieve_response
            .retrieval_results
            .into_iter()
            .map(RetrievedPassage::from)
            .collect())
    }
}
