//! Topic gating
//!
//! Decides whether a query belongs to the heavy machinery domain before any
//! retrieval happens. Two classifiers implement [`TopicClassifier`]:
//! - [`LlmTopicClassifier`]: zero-shot classification through the generation service
//! - [`KeywordTopicClassifier`]: vocabulary scan used when the service is unavailable
//!
//! [`TopicGate`] runs the primary classifier and consults the fallback only
//! when the primary fails with a service error.

mod keywords;
mod llm;

pub use keywords::{KeywordTopicClassifier, DOMAIN_KEYWORDS};
pub use llm::{build_classification_prompt, LlmTopicClassifier};

use crate::error::Result;
use crate::llm::TextGenerator;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Letter categories offered to the zero-shot classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Questions about AI models or system architecture
    A,
    /// Profanity, hate speech or toxic content
    B,
    /// Anything outside the domain
    C,
    /// Questions about the assistant's own instructions
    D,
    /// Exclusively heavy machinery and construction equipment
    E,
}

impl Category {
    /// Parse a classifier reply; surrounding whitespace and case are ignored
    pub fn parse(reply: &str) -> Option<Self> {
        match reply.trim().to_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            _ => None,
        }
    }
}

/// Outcome of classifying one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationLabel {
    OffTopicMeta,
    OffTopicGeneral,
    OffTopicToxic,
    OnTopic,
    /// Classifier output that matched no category
    AmbiguousFallback,
}

impl ClassificationLabel {
    /// Only an explicit on-topic verdict admits a query
    pub fn is_on_topic(self) -> bool {
        self == Self::OnTopic
    }
}

impl From<Category> for ClassificationLabel {
    fn from(category: Category) -> Self {
        match category {
            Category::A | Category::D => Self::OffTopicMeta,
            Category::B => Self::OffTopicToxic,
            Category::C => Self::OffTopicGeneral,
            Category::E => Self::OnTopic,
        }
    }
}

/// Topic classification trait
#[async_trait]
pub trait TopicClassifier: Send + Sync {
    /// Classify a query
    async fn classify(&self, query: &str) -> Result<ClassificationLabel>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Primary classifier with a fallback for service outages
pub struct TopicGate {
    primary: Arc<dyn TopicClassifier>,
    fallback: Arc<dyn TopicClassifier>,
}

impl TopicGate {
    pub fn new(primary: Arc<dyn TopicClassifier>, fallback: Arc<dyn TopicClassifier>) -> Self {
        Self { primary, fallback }
    }

    /// Zero-shot classification through `generator`, keyword scan as fallback
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self::new(
            Arc::new(LlmTopicClassifier::new(generator)),
            Arc::new(KeywordTopicClassifier::new()),
        )
    }

    /// Whether the query is in scope
    pub async fn classify(&self, query: &str) -> bool {
        self.label(query).await.is_on_topic()
    }

    /// Resolve the label for a query, falling back on service errors
    pub async fn label(&self, query: &str) -> ClassificationLabel {
        match self.primary.classify(query).await {
            Ok(label) => label,
            Err(e) if e.is_service_error() => {
                tracing::warn!(
                    "{} classifier unavailable ({}), using {} fallback",
                    self.primary.name(),
                    e,
                    self.fallback.name()
                );
                match self.fallback.classify(query).await {
                    Ok(label) => label,
                    Err(e) => {
                        tracing::warn!("{} fallback failed: {}", self.fallback.name(), e);
                        ClassificationLabel::AmbiguousFallback
                    }
                }
            }
            Err(e) => {
                tracing::warn!("{} classifier rejected query: {}", self.primary.name(), e);
                ClassificationLabel::AmbiguousFallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RagError;

    struct Fixed(fn() -> Result<ClassificationLabel>);

    #[async_trait]
    impl TopicClassifier for Fixed {
        async fn classify(&self, _query: &str) -> Result<ClassificationLabel> {
            (self.0)()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn gate(primary: fn() -> Result<ClassificationLabel>) -> TopicGate {
        TopicGate::new(
            Arc::new(Fixed(primary)),
            Arc::new(KeywordTopicClassifier::new()),
        )
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("E"), Some(Category::E));
        assert_eq!(Category::parse("  e\n"), Some(Category::E));
        assert_eq!(Category::parse("c"), Some(Category::C));
        assert_eq!(Category::parse("E."), None);
        assert_eq!(Category::parse("Category E"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_meta_categories_share_a_label() {
        assert_eq!(
            ClassificationLabel::from(Category::A),
            ClassificationLabel::OffTopicMeta
        );
        assert_eq!(
            ClassificationLabel::from(Category::D),
            ClassificationLabel::OffTopicMeta
        );
        assert!(ClassificationLabel::from(Category::E).is_on_topic());
        assert!(!ClassificationLabel::AmbiguousFallback.is_on_topic());
    }

    #[tokio::test]
    async fn test_negative_label_does_not_fall_back() {
        let gate = gate(|| Ok(ClassificationLabel::OffTopicGeneral));
        // The keyword scan would admit this query; the primary verdict stands.
        assert!(!gate.classify("excavator prices").await);
    }

    #[tokio::test]
    async fn test_service_error_falls_back_to_keywords() {
        let gate = gate(|| {
            Err(RagError::Service {
                status: 503,
                body: "unavailable".to_string(),
            })
        });
        assert!(gate.classify("How deep can an excavator dig?").await);
        assert!(!gate.classify("What's the weather today?").await);
    }

    #[tokio::test]
    async fn test_non_service_error_denies() {
        let gate = gate(|| Err(RagError::InvalidInput("bad".to_string())));
        assert_eq!(
            gate.label("bulldozer").await,
            ClassificationLabel::AmbiguousFallback
        );
    }
}
