//! Clause trace binary
//!
//! Prints the analysis report for a plain-text document to stdout. Logs go to
//! stderr so the output stays valid JSON.
//!
//! The runtime is built by hand so it can be dropped without joining an
//! analysis task that has already timed out.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use clause_engine::{config::parse_threshold, AnalyzeOptions, ClauseEngine, EngineConfig};
use clause_trace::{analyze_document, run_detached, Limits};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "clause-trace")]
#[command(version, about = "Trace compliance clauses through a plain-text document")]
struct Args {
    /// Plain-text document to analyze
    file: PathBuf,

    /// Clause catalog (JSON); overrides CLAUSE_RULES_FILE
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Fuzzy match threshold 0-100; overrides CLAUSE_MATCH_THRESHOLD
    #[arg(short, long, value_parser = parse_threshold)]
    threshold: Option<u8>,

    /// Include the compliance summary
    #[arg(short, long)]
    summary: bool,

    /// Give up after this many milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// Refuse documents with more paragraphs than this
    #[arg(long, default_value = "10000")]
    max_paragraphs: usize,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run_detached(run(args)).context("Failed to start async runtime")?
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = EngineConfig::from_env()?;
    if let Some(rules) = &args.rules {
        config = config.with_rules_file(rules);
    }
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold)?;
    }

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read document: {}", args.file.display()))?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    let engine = Arc::new(ClauseEngine::new(&config));
    tracing::info!(
        rules = %config.rules_file.display(),
        config_loaded = engine.config_loaded(),
        threshold = engine.threshold(),
        "Clause engine ready"
    );

    let report = analyze_document(
        engine,
        text,
        AnalyzeOptions {
            include_summary: args.summary,
        },
        Limits {
            timeout_ms: args.timeout_ms,
            max_paragraphs: args.max_paragraphs,
        },
    )
    .await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
