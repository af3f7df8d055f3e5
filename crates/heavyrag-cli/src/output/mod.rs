//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use heavyrag_core::PipelineResult;

/// Format a pipeline result
pub fn format_pipeline_result(result: &PipelineResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_result(result),
        OutputFormat::Cli => terminal::format_result(result),
    }
}
