//! CLI argument definitions

use clap::{builder::NonEmptyStringValueParser, Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "heavyrag")]
#[command(
    author,
    version,
    about = "Heavy machinery assistant answering from a knowledge base"
)]
pub struct Cli {
    /// Knowledge base identifier
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub kb_id: String,

    /// Model used for classification and answers (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Ask a single question and exit
    #[arg(long)]
    pub ask: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
