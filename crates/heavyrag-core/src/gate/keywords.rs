//! Keyword-based topic classifier

use super::{ClassificationLabel, TopicClassifier};
use crate::error::Result;
use async_trait::async_trait;

/// Equipment types, manufacturers and generic domain terms
pub const DOMAIN_KEYWORDS: &[&str] = &[
    "bulldozer",
    "excavator",
    "crane",
    "loader",
    "backhoe",
    "forklift",
    "grader",
    "compactor",
    "tractor",
    "dozer",
    "skid steer",
    "asphalt",
    "pavement",
    "construction",
    "equipment",
    "machinery",
    "caterpillar",
    "deere",
    "komatsu",
    "hitachi",
    "volvo",
    "case",
    "bobcat",
    "jcb",
    "heavy equipment",
    "construction vehicle",
    "earth mover",
];

/// Substring scan over a fixed vocabulary.
///
/// Admits anything mentioning a domain term, so it is less precise than the
/// zero-shot classifier ("showcase" matches "case").
pub struct KeywordTopicClassifier {
    keywords: Vec<String>,
}

impl KeywordTopicClassifier {
    pub fn new() -> Self {
        Self::with_keywords(DOMAIN_KEYWORDS.iter().copied())
    }

    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// First vocabulary term found in the query
    pub fn matching_keyword(&self, query: &str) -> Option<&str> {
        let query_lower = query.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| query_lower.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

impl Default for KeywordTopicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TopicClassifier for KeywordTopicClassifier {
    async fn classify(&self, query: &str) -> Result<ClassificationLabel> {
        match self.matching_keyword(query) {
            Some(keyword) => {
                tracing::info!("Fallback validation passed: contains '{}'", keyword);
                Ok(ClassificationLabel::OnTopic)
            }
            None => {
                tracing::info!("Fallback validation failed: not about heavy machinery");
                Ok(ClassificationLabel::OffTopicGeneral)
            }
        }
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
