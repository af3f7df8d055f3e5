//! Heavyrag CLI
//!
//! Ask heavy machinery questions answered from a knowledge base.

use anyhow::Result;
use clap::Parser;
use heavyrag_core::{BedrockClient, BedrockKnowledgeBase, Config, RagPipeline};
use std::sync::Arc;

mod app;
mod output;
mod repl;

use app::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    if cli.verbose {
        filter = filter
            .add_directive("heavyrag_core=debug".parse()?)
            .add_directive("heavyrag=debug".parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (generator, store) = match connect(&cli) {
        Ok(clients) => clients,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };
    let pipeline = RagPipeline::new(generator.clone(), store);

    match cli.ask {
        Some(ref question) => {
            let result = pipeline.run(question.trim(), &cli.kb_id).await;
            print!("{}", output::format_pipeline_result(&result, cli.format));
        }
        None => repl::run(&pipeline, &cli.kb_id, cli.format).await?,
    }

    if cli.verbose {
        let metrics = generator.metrics();
        tracing::info!(
            "Generation calls: {} ({} errors, {:.1}ms avg)",
            metrics.total_requests,
            metrics.total_errors,
            metrics.avg_latency_ms
        );
    }

    Ok(())
}

/// Load configuration and build the service clients
fn connect(cli: &Cli) -> heavyrag_core::Result<(Arc<BedrockClient>, Arc<BedrockKnowledgeBase>)> {
    let mut config = Config::load()?;
    if let Some(ref model) = cli.model {
        config.service.model = model.clone();
    }
    config.service.validate()?;

    let generator = Arc::new(BedrockClient::new(config.service.clone())?);
    let store = Arc::new(BedrockKnowledgeBase::new(config.service)?);
    Ok((generator, store))
}
