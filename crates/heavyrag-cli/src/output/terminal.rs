//! Terminal output formatter

use heavyrag_core::PipelineResult;

pub fn format_result(result: &PipelineResult) -> String {
    let mut output = String::new();

    if !result.success {
        output.push_str(&format!("\n❌ {}\n", result.response));
        return output;
    }

    output.push_str("\n✅ Answer:\n");
    output.push_str(&result.response);
    output.push('\n');

    if !result.sources.is_empty() {
        output.push_str("\n📚 Sources:\n");
        for source in &result.sources {
            output.push_str(&format!("  [{}] (score: {:.3})\n", source.id, source.score));
            output.push_str(&format!("     {}\n", source.content));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use heavyrag_core::SourceSummary;

    #[test]
    fn test_answer_with_sources() {
        let result = PipelineResult {
            success: true,
            response: "Use the ripper for hard ground.".to_string(),
            sources: vec![SourceSummary {
                id: 1,
                content: "Rippers break up rock...".to_string(),
                score: 0.8123,
                metadata: serde_json::Map::new(),
            }],
            model_used: Some("amazon.titan-text-express-v1".to_string()),
        };

        assert_eq!(
            format_result(&result),
            "\n✅ Answer:\nUse the ripper for hard ground.\n\n📚 Sources:\n  [1] (score: 0.812)\n     Rippers break up rock...\n"
        );
    }

    #[test]
    fn test_refusal() {
        let output = format_result(&PipelineResult::off_topic());
        assert_eq!(
            output,
            "\n❌ I can only answer questions about heavy machinery and construction equipment.\n"
        );
    }
}
