//! Gate, retrieve, assemble, generate
//!
//! ```text
//! Start -> Gating -> Retrieving -> Assembling -> Generating -> Done
//!            |           |
//!         Rejected     Empty
//! ```
//!
//! Every external failure has already been absorbed by the component that
//! made the call, so [`RagPipeline::run`] always returns a [`PipelineResult`].

use crate::config::ServiceConfig;
use crate::context::{ContextAssembler, SourceSummary};
use crate::error::Result;
use crate::gate::TopicGate;
use crate::generator::AnswerGenerator;
use crate::llm::{
    BedrockClient, BedrockKnowledgeBase, GenerationConfig, KnowledgeStore, TextGenerator,
};
use crate::retriever::KnowledgeRetriever;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Reply when the gate rejects a query
pub const OFF_TOPIC_RESPONSE: &str =
    "I can only answer questions about heavy machinery and construction equipment.";

/// Reply when the knowledge base has nothing for a query
pub const NO_RESULTS_RESPONSE: &str =
    "I couldn't find relevant information about that in my knowledge base.";

/// Passages requested from the knowledge base and placed in the prompt
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Where a pipeline invocation is, or where it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    Gating,
    Retrieving,
    Assembling,
    Generating,
    Done,
    Rejected,
    Empty,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Gating => "gating",
            Self::Retrieving => "retrieving",
            Self::Assembling => "assembling",
            Self::Generating => "generating",
            Self::Done => "done",
            Self::Rejected => "rejected",
            Self::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Outcome of one pipeline invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub success: bool,
    pub response: String,
    pub sources: Vec<SourceSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

impl PipelineResult {
    fn refusal(response: &str) -> Self {
        Self {
            success: false,
            response: response.to_string(),
            sources: Vec::new(),
            model_used: None,
        }
    }

    /// The gate rejected the query
    pub fn off_topic() -> Self {
        Self::refusal(OFF_TOPIC_RESPONSE)
    }

    /// Retrieval found nothing
    pub fn no_results() -> Self {
        Self::refusal(NO_RESULTS_RESPONSE)
    }
}

/// Topic-gated retrieval-augmented generation
pub struct RagPipeline {
    gate: TopicGate,
    retriever: KnowledgeRetriever,
    assembler: ContextAssembler,
    answerer: AnswerGenerator,
    max_results: usize,
    generation: GenerationConfig,
}

impl RagPipeline {
    /// Build a pipeline around injected service handles
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn KnowledgeStore>) -> Self {
        Self {
            gate: TopicGate::with_generator(generator.clone()),
            retriever: KnowledgeRetriever::new(store),
            assembler: ContextAssembler::new(),
            answerer: AnswerGenerator::new(generator),
            max_results: DEFAULT_MAX_RESULTS,
            generation: GenerationConfig::default(),
        }
    }

    /// Build a pipeline talking to the hosted services described by `config`
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let generator = BedrockClient::new(config.clone())?;
        let store = BedrockKnowledgeBase::new(config.clone())?;
        Ok(Self::new(Arc::new(generator), Arc::new(store)))
    }

    /// Replace the topic gate
    pub fn with_gate(mut self, gate: TopicGate) -> Self {
        self.gate = gate;
        self
    }

    /// Override the answer decoding parameters
    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Model that answers (and classifies) queries
    pub fn model_id(&self) -> &str {
        self.answerer.model_name()
    }

    /// Answer `query` from knowledge base `kb_id`
    pub async fn run(&self, query: &str, kb_id: &str) -> PipelineResult {
        tracing::info!("Processing query: {}", query);
        let mut stage = PipelineStage::Start;

        stage = self.advance(stage, PipelineStage::Gating);
        if !self.gate.classify(query).await {
            self.advance(stage, PipelineStage::Rejected);
            return PipelineResult::off_topic();
        }

        stage = self.advance(stage, PipelineStage::Retrieving);
        let passages = self.retriever.retrieve(query, kb_id, self.max_results).await;
        if passages.is_empty() {
            self.advance(stage, PipelineStage::Empty);
            return PipelineResult::no_results();
        }

        stage = self.advance(stage, PipelineStage::Assembling);
        let context = self.assembler.assemble(&passages, self.max_results);

        stage = self.advance(stage, PipelineStage::Generating);
        let prompt = build_answer_prompt(&context.text, query);
        let response = self.answerer.generate(&prompt, &self.generation).await;

        self.advance(stage, PipelineStage::Done);
        PipelineResult {
            success: true,
            response,
            sources: context.sources,
            model_used: Some(self.model_id().to_string()),
        }
    }

    fn advance(&self, from: PipelineStage, to: PipelineStage) -> PipelineStage {
        tracing::debug!("Pipeline stage {} -> {}", from, to);
        to
    }
}

/// Expert persona, retrieved context, then the question; the model continues after `ANSWER:`
pub fn build_answer_prompt(context: &str, query: &str) -> String {
    format!(
        "You are an expert on heavy machinery and construction equipment. \n\
         Use the information below to answer the question. Be accurate and helpful.\n\
         \n\
         INFORMATION:\n\
         {}\n\
         \n\
         QUESTION: {}\n\
         \n\
         ANSWER:",
        context, query
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_prompt_layout() {
        let prompt = build_answer_prompt(
            "[Source 1 - Relevance: 0.900]\nD9 specs\n",
            "How heavy is a D9?",
        );
        assert_eq!(
            prompt,
            "You are an expert on heavy machinery and construction equipment. \n\
             Use the information below to answer the question. Be accurate and helpful.\n\
             \n\
             INFORMATION:\n\
             [Source 1 - Relevance: 0.900]\n\
             D9 specs\n\
             \n\
             \n\
             QUESTION: How heavy is a D9?\n\
             \n\
             ANSWER:"
        );
    }

    #[test]
    fn test_refusals_are_empty() {
        let rejected = PipelineResult::off_topic();
        assert!(!rejected.success);
        assert_eq!(rejected.response, OFF_TOPIC_RESPONSE);
        assert!(rejected.sources.is_empty());

        let empty = PipelineResult::no_results();
        assert!(!empty.success);
        assert_eq!(empty.response, NO_RESULTS_RESPONSE);
        assert!(empty.model_used.is_none());
    }

    #[test]
    fn test_result_json_omits_missing_model() {
        let json = serde_json::to_value(PipelineResult::off_topic()).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("model_used").is_none());
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(PipelineStage::Gating.to_string(), "gating");
        assert_eq!(PipelineStage::Empty.to_string(), "empty");
    }
}
