//! Heavyrag Core Library
//!
//! Topic-gated retrieval-augmented generation for heavy machinery and
//! construction equipment questions.
//!
//! # Features
//! - Zero-shot topic gating with a keyword fallback
//! - Hybrid (vector + lexical) retrieval from a managed knowledge base
//! - Score-labeled context assembly with truncated source previews
//! - Grounded answer generation with fail-soft service handling

pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod generator;
pub mod llm;
pub mod pipeline;
pub mod retriever;

pub use config::{Config, ServiceConfig};
pub use context::{AssembledContext, ContextAssembler, SourceSummary, PREVIEW_CHARS};
pub use error::{Error, RagError, Result};
pub use gate::{
    Category, ClassificationLabel, KeywordTopicClassifier, LlmTopicClassifier, TopicClassifier,
    TopicGate,
};
pub use generator::AnswerGenerator;
pub use llm::{
    BedrockClient, BedrockKnowledgeBase, GenerationConfig, KnowledgeStore, MetricsSnapshot,
    RetrievalRequest, RetrievedPassage, SearchType, TextGenerator,
};
pub use pipeline::{
    build_answer_prompt, PipelineResult, PipelineStage, RagPipeline, DEFAULT_MAX_RESULTS,
    NO_RESULTS_RESPONSE, OFF_TOPIC_RESPONSE,
};
pub use retriever::KnowledgeRetriever;

/// Model used when none is configured
pub const DEFAULT_MODEL_ID: &str = "amazon.titan-text-express-v1";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "heavyrag";
