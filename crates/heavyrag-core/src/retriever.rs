//! Fail-soft knowledge base retrieval

use crate::llm::{KnowledgeStore, RetrievalRequest, RetrievedPassage, SearchType};
use std::sync::Arc;

/// Issues hybrid searches against a knowledge store.
///
/// Results come back in the store's order; nothing is re-ranked here.
pub struct KnowledgeRetriever {
    store: Arc<dyn KnowledgeStore>,
}

impl KnowledgeRetriever {
    pub fn new(store: Arc<dyn KnowledgeStore>) -> Self {
        Self { store }
    }

    /// Fetch up to `max_results` passages. Service errors yield an empty list.
    pub async fn retrieve(
        &self,
        query: &str,
        store_id: &str,
        max_results: usize,
    ) -> Vec<RetrievedPassage> {
        let request = RetrievalRequest {
            query: query.to_string(),
            store_id: store_id.to_string(),
            max_results,
            search_type: SearchType::Hybrid,
        };

        match self.store.retrieve(&request).await {
            Ok(passages) => passages,
            Err(e) => {
                tracing::warn!("Error querying knowledge base {}: {}", store_id, e);
                Vec::new()
            }
        }
    }
}
