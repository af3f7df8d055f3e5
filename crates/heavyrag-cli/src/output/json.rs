//! JSON output formatter

use heavyrag_core::PipelineResult;

pub fn format_result(result: &PipelineResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string()) + "\n"
}
