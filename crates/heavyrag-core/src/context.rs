//! Context block assembly for RAG prompts

use crate::llm::RetrievedPassage;
use serde::{Deserialize, Serialize};

/// Maximum characters kept in a source preview
pub const PREVIEW_CHARS: usize = 200;

/// Appended to previews that were cut short
pub const ELLIPSIS: &str = "...";

/// Display projection of a retrieved passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// 1-based position within the result set
    pub id: usize,
    pub content: String,
    pub score: f64,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Labeled context text plus the sources it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledContext {
    pub text: String,
    pub sources: Vec<SourceSummary>,
}

/// Formats passages into numbered, score-labeled blocks
#[derive(Debug, Clone, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Build context from the first `limit` passages, in the order given
    pub fn assemble(&self, passages: &[RetrievedPassage], limit: usize) -> AssembledContext {
        let mut context_parts = Vec::new();
        let mut sources = Vec::new();

        for (idx, passage) in passages.iter().take(limit).enumerate() {
            let id = idx + 1;

            context_parts.push(format!("[Source {} - Relevance: {:.3}]", id, passage.score));
            context_parts.push(passage.content.clone());
            context_parts.push(String::new());

            sources.push(SourceSummary {
                id,
                content: preview(&passage.content),
                score: passage.score,
                metadata: passage.metadata.clone(),
            });
        }

        AssembledContext {
            text: context_parts.join("\n"),
            sources,
        }
    }
}

/// First [`PREVIEW_CHARS`] characters, with [`ELLIPSIS`] when truncated
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], ELLIPSIS),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn passages() -> Vec<RetrievedPassage> {
        vec![
            RetrievedPassage::new("The D9 is a large track-type tractor.", 0.812),
            RetrievedPassage::new("Dozer blades come in S, U and SU shapes.", 0.701),
        ]
    }

    #[test]
    fn test_context_layout() {
        let assembled = ContextAssembler::new().assemble(&passages(), 3);
        assert_eq!(
            assembled.text,
            "[Source 1 - Relevance: 0.812]\n\
             The D9 is a large track-type tractor.\n\
             \n\
             [Source 2 - Relevance: 0.701]\n\
             Dozer blades come in S, U and SU shapes.\n"
        );
        let ids: Vec<usize> = assembled.sources.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(assembled.sources[1].score, 0.701);
    }

    #[test]
    fn test_limit_and_order_are_respected() {
        let mut many = passages();
        many.push(RetrievedPassage::new("third", 0.99));
        many.push(RetrievedPassage::new("fourth", 0.5));

        let assembled = ContextAssembler::new().assemble(&many, 3);
        assert_eq!(assembled.sources.len(), 3);
        assert_eq!(assembled.sources[2].content, "third");
        assert!(!assembled.text.contains("fourth"));
        assert!(assembled.text.contains("[Source 3 - Relevance: 0.990]"));
    }

    #[test]
    fn test_score_has_three_decimals() {
        let assembled =
            ContextAssembler::new().assemble(&[RetrievedPassage::new("x", 0.5)], 3);
        assert!(assembled.text.starts_with("[Source 1 - Relevance: 0.500]"));
    }

    #[test]
    fn test_empty_input() {
        let assembled = ContextAssembler::new().assemble(&[], 3);
        assert!(assembled.text.is_empty());
        assert!(assembled.sources.is_empty());
    }

    #[test]
    fn test_preview_boundary() {
        let exact = "a".repeat(200);
        assert_eq!(preview(&exact), exact);

        let over = "b".repeat(201);
        assert_eq!(preview(&over), format!("{}...", "b".repeat(200)));
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let content = "é".repeat(201);
        let cut = preview(&content);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("é..."));
        assert_eq!(preview(&"é".repeat(200)), "é".repeat(200));
    }

    #[test]
    fn test_metadata_is_carried_over() {
        let mut passage = RetrievedPassage::new("content", 0.3);
        passage
            .metadata
            .insert("page".to_string(), serde_json::json!(4));
        let assembled = ContextAssembler::new().assemble(&[passage], 3);
        assert_eq!(assembled.sources[0].metadata["page"], 4);
    }

    proptest! {
        #[test]
        fn prop_assembly_is_deterministic(
            items in prop::collection::vec(("[ -~]{0,300}", 0.0f64..1.0), 0..6)
        ) {
            let passages: Vec<RetrievedPassage> = items
                .into_iter()
                .map(|(content, score)| RetrievedPassage::new(content, score))
                .collect();
            let assembler = ContextAssembler::new();
            prop_assert_eq!(assembler.assemble(&passages, 3), assembler.assemble(&passages, 3));
        }

        #[test]
        fn prop_preview_length_is_bounded(content in "\\PC{0,400}") {
            let cut = preview(&content);
            let len = content.chars().count();
            if len <= PREVIEW_CHARS {
                prop_assert_eq!(cut, content);
            } else {
                prop_assert_eq!(cut.chars().count(), PREVIEW_CHARS + ELLIPSIS.len());
                prop_assert!(cut.ends_with(ELLIPSIS));
                prop_assert!(content.starts_with(&cut[..cut.len() - ELLIPSIS.len()]));
            }
        }
    }
}
