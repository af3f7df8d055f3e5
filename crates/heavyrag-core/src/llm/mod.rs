//! External service integration
//!
//! Provides traits and HTTP implementations for:
//! - Text generation via the hosted model invocation API
//! - Passage retrieval from a managed knowledge base

mod client;
mod knowledge_base;
mod traits;

pub use client::{APIMetrics, BedrockClient, MetricsSnapshot};
pub use knowledge_base::BedrockKnowledgeBase;
pub use traits::*;
