//! Fail-soft answer generation

use crate::llm::{GenerationConfig, TextGenerator};
use std::sync::Arc;

/// Sends a finished prompt to the generation service
pub struct AnswerGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl AnswerGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Model used for generation
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Generate an answer for `prompt`. Service errors yield an empty string.
    pub async fn generate(&self, prompt: &str, config: &GenerationConfig) -> String {
        match self.generator.generate(prompt, config).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Error generating response: {}", e);
                String::new()
            }
        }
    }
}
