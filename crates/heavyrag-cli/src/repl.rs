//! Interactive question loop

use crate::app::OutputFormat;
use crate::output::format_pipeline_result;
use anyhow::Result;
use heavyrag_core::RagPipeline;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "\n🔧 Your question: ";
const EXIT_WORDS: &[&str] = &["quit", "exit", "q"];

/// What to do with one line of user input
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Exit,
    Skip,
    Query(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if EXIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
            Input::Exit
        } else if trimmed.is_empty() {
            Input::Skip
        } else {
            Input::Query(trimmed.to_string())
        }
    }
}

pub fn banner(model: &str, kb_id: &str) -> String {
    format!(
        "🤖 Heavy Machinery Assistant (model: {})\nKnowledge Base: {}\nType 'quit' to exit\n{}",
        model,
        kb_id,
        "-".repeat(50)
    )
}

/// Read questions until an exit word or EOF
///
/// In `json` format stdout carries only the result documents; the banner and
/// separators are printed in `cli` format alone.
pub async fn run(pipeline: &RagPipeline, kb_id: &str, format: OutputFormat) -> Result<()> {
    let decorated = format == OutputFormat::Cli;
    let mut editor = DefaultEditor::new()?;
    if decorated {
        println!("{}", banner(pipeline.model_id(), kb_id));
    }

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let query = match Input::parse(&line) {
            Input::Exit => {
                if decorated {
                    println!("Goodbye!");
                }
                break;
            }
            Input::Skip => continue,
            Input::Query(query) => query,
        };
        let _ = editor.add_history_entry(query.as_str());

        if decorated {
            println!("\n{}", "=".repeat(60));
            println!("Query: {}", query);
        }

        let result = pipeline.run(&query, kb_id).await;
        print!("{}", format_pipeline_result(&result, format));

        if decorated {
            println!("{}", "=".repeat(60));
        }
    }

    Ok(())
}
