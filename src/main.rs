use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gap_hunter::config::Config;
use gap_hunter::formatters::{self, ExportFormat};
use gap_hunter::models::HuntStatus;
use gap_hunter::{GapHunter, HuntReport};

/// Gap Hunter - find research gaps for a topic across academic search APIs
#[derive(Parser, Debug)]
#[command(name = "gap-hunter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch fresh research gaps for a topic and rate their novelty", long_about = None)]
struct Cli {
    /// Research topic to hunt gaps for; omit for an interactive prompt
    topic: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    /// Maximum results requested from each source
    #[arg(long, short, default_value_t = 5)]
    max_results: usize,

    /// Recency window in years; older papers are dropped
    #[arg(long)]
    recency_years: Option<u16>,

    /// Write the export to a file instead of stdout only
    #[arg(long, short)]
    export: Option<PathBuf>,

    /// Enable verbose logging (-v, -vv for more)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// YAML (primary format)
    Yaml,
    /// JSON
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => ExportFormat::Yaml,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("gap_hunter={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::default();
    config.max_results = cli.max_results;
    if let Some(years) = cli.recency_years {
        config.recency_years = years;
    }

    let hunter = GapHunter::new(config)?;

    match cli.topic {
        Some(ref topic) => run_once(&hunter, topic, &cli).await,
        None => run_interactive(&hunter, &cli).await,
    }
}

/// Hunt a single topic and print/export the result
async fn run_once(hunter: &GapHunter, topic: &str, cli: &Cli) -> Result<()> {
    let report = hunter.hunt(topic).await?;
    emit_report(&report, cli)?;
    Ok(())
}

/// Prompt loop for topic after topic
async fn run_interactive(hunter: &GapHunter, cli: &Cli) -> Result<()> {
    if !cli.quiet {
        println!("Gap Hunter - fetch fresh research gaps and rate their novelty.");
        println!(
            "Type any topic for a YAML table of papers, gaps, keywords, and scores \
             (score < 3 is marked \"rethink\"). Type \"quit\" to leave."
        );
    }

    let stdin = std::io::stdin();
    loop {
        print!("\nEnter research topic: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let topic = line.trim();

        if matches!(topic.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        if topic.is_empty() {
            continue;
        }

        match hunter.hunt(topic).await {
            Ok(report) => emit_report(&report, cli)?,
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

/// Print a report to stdout and optionally write it to the export file
fn emit_report(report: &HuntReport, cli: &Cli) -> Result<()> {
    if report.status == HuntStatus::InsufficientData {
        eprintln!("Insufficient data for this topic.");
        return Ok(());
    }

    let rendered = formatters::export(&report.records, cli.output.into())?;
    println!("{}", rendered);

    if let Some(ref path) = cli.export {
        std::fs::write(path, &rendered)?;
        if !cli.quiet {
            eprintln!("Exported {} records to {}", report.records.len(), path.display());
        }
    }

    Ok(())
}
