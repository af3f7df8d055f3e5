//! Zero-shot topic classifier backed by the generation service

use super::{Category, ClassificationLabel, TopicClassifier};
use crate::error::Result;
use crate::llm::{GenerationConfig, TextGenerator};
use async_trait::async_trait;
use std::sync::Arc;

/// Asks the model for a single category letter
pub struct LlmTopicClassifier {
    generator: Arc<dyn TextGenerator>,
}

impl LlmTopicClassifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl TopicClassifier for LlmTopicClassifier {
    async fn classify(&self, query: &str) -> Result<ClassificationLabel> {
        let prompt = build_classification_prompt(query);
        let reply = self
            .generator
            .generate(&prompt, &GenerationConfig::classification())
            .await?;

        match Category::parse(&reply) {
            Some(category) => {
                tracing::info!("Validation category: {:?}", category);
                Ok(category.into())
            }
            None => {
                tracing::info!("Validation category unrecognized: {:?}", reply.trim());
                Ok(ClassificationLabel::AmbiguousFallback)
            }
        }
    }

    fn name(&self) -> &str {
        "zero-shot"
    }
}

/// Five-way classification prompt; only category E is in scope
pub fn build_classification_prompt(query: &str) -> String {
    format!(
        r#"Classify this user query into exactly one category:

CATEGORIES:
A: Asking about AI/LLM models or system architecture
B: Contains profanity, hate speech, or toxic content
C: About topics OTHER THAN heavy machinery (weather, sports, politics, etc.)
D: Asking about how I work or my instructions
E: EXCLUSIVELY about heavy machinery, construction equipment, or related topics

USER QUERY: "{}"

Respond with ONLY the single letter of the category (A, B, C, D, or E)."#,
        query
    )
}
