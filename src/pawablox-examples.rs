//! Pawablox example generator
//!
//! Builds catalog examples with the ExampleFactory and prints their markup,
//! one example per line.
//!
//! ```text
//! pawablox-examples button --config '{"variant":"btn-danger","text":"Delete"}'
//! pawablox-examples checkbox --count 3
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pawablox::{to_html, Document, ExampleConfig, ExampleFactory, ExampleKind};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pawablox-examples", about = "Print generated catalog example markup")]
struct Cli {
    /// Example kind: button, badge, checkbox, radio, input or alert
    kind: String,

    /// Example properties as a JSON object
    #[arg(long)]
    config: Option<String>,

    /// Number of examples to generate
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Seed for reproducible element ids
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if ExampleKind::from_tag(&cli.kind).is_none() {
        tracing::error!(kind = %cli.kind, "unknown example kind");
        return Ok(ExitCode::FAILURE);
    }

    let config: ExampleConfig = match &cli.config {
        Some(json) => serde_json::from_str(json).context("invalid --config JSON")?,
        None => ExampleConfig::default(),
    };

    let mut factory = match cli.seed {
        Some(seed) => ExampleFactory::with_seed(seed),
        None => ExampleFactory::new(),
    };
    let mut doc = Document::new("about:blank");

    for _ in 0..cli.count {
        let Some(node) = factory.create(&mut doc, &cli.kind, config.clone()) else {
            return Ok(ExitCode::FAILURE);
        };
        // Attached so later ids also avoid the ones already printed
        let body = doc.body();
        doc.append_child(body, node);
        println!("{}", to_html(&doc, node));
    }

    Ok(ExitCode::SUCCESS)
}
