//! CLI commands implementation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use serde::Serialize;

use docboard::analysis::{AnalysisOptions, Orchestrator, SummaryLength};
use docboard::config::Config;
use docboard::extract::TextExtractor;
use docboard::heuristics;
use docboard::models::AnalysisOutput;

#[derive(Parser)]
#[command(name = "docboard")]
#[command(about = "Turn documents into dashboard descriptions")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of discovering one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and print the dashboard (or HTML document)
    Analyze {
        /// Document to analyze (.txt, .pdf, .docx, .doc)
        file: PathBuf,
        /// Extra instructions for the generation service
        #[arg(short, long)]
        prompt: Option<String>,
        /// Summary depth for generated dashboards
        #[arg(short = 'l', long, value_enum, default_value_t = SummaryLength::Standard)]
        summary_length: SummaryLength,
        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Ask a question about a document
    Chat {
        /// Document to ask about
        file: PathBuf,
        /// The question
        question: String,
    },

    /// Print the extracted plain text of a document
    Extract {
        /// Document to read
        file: PathBuf,
    },

    /// Show heuristic artifacts (tables, value matrix, flow) for a document
    Inspect {
        /// Document to inspect
        file: PathBuf,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show configuration and the selected analysis strategy
    Status,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_explicit(path).await,
        None => Config::load().await,
    };

    match cli.command {
        Commands::Analyze {
            file,
            prompt,
            summary_length,
            output,
            pretty,
        } => {
            let mut options = AnalysisOptions::new().with_summary_length(summary_length);
            if let Some(prompt) = prompt {
                options = options.with_custom_prompt(prompt);
            }
            cmd_analyze(&config, &file, &options, output.as_deref(), pretty).await
        }
        Commands::Chat { file, question } => cmd_chat(&config, &file, &question).await,
        Commands::Extract { file } => cmd_extract(&file),
        Commands::Inspect { file, pretty } => cmd_inspect(&file, pretty),
        Commands::Status => cmd_status(&config),
    }
}

async fn cmd_analyze(
    config: &Config,
    file: &Path,
    options: &AnalysisOptions,
    output: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::from_config(config);
    let result = orchestrator.analyze_file(file, options).await;

    let rendered = match &result {
        AnalysisOutput::CustomHtml(artifact) => artifact.html_content.clone(),
        AnalysisOutput::Dashboard(_) => to_json(&result, pretty)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} output to {}",
                style("✓").green(),
                orchestrator.strategy_name(),
                path.display()
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

async fn cmd_chat(config: &Config, file: &Path, question: &str) -> anyhow::Result<()> {
    let text = extract(file)?;
    let orchestrator = Orchestrator::from_config(config);
    let response = orchestrator.chat(&text, question).await;
    println!("{}", to_json(&response, false)?);
    Ok(())
}

fn cmd_extract(file: &Path) -> anyhow::Result<()> {
    let text = extract(file)?;
    print!("{}", text);
    Ok(())
}

fn cmd_inspect(file: &Path, pretty: bool) -> anyhow::Result<()> {
    let text = extract(file)?;
    let artifacts = heuristics::inspect(&text);
    println!("{}", to_json(&artifacts, pretty)?);
    Ok(())
}

fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::from_config(config);

    println!("\n{}", style("docboard status").bold());
    println!("{}", "-".repeat(40));
    println!(
        "{:<20} {}",
        "Config file:",
        config
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string())
    );
    println!("{:<20} {}", "Provider:", config.analysis.provider);
    println!("{:<20} {}", "Strategy:", orchestrator.strategy_name());
    println!(
        "{:<20} {} ({})",
        "Groq:",
        key_status(config.llm.groq.api_key.as_deref()),
        config.llm.groq.model
    );
    println!(
        "{:<20} {} ({})",
        "Gemini:",
        key_status(config.llm.gemini.api_key.as_deref()),
        config.llm.gemini.model
    );
    println!(
        "{:<20} {}",
        "Chat:",
        if orchestrator.chat_available() {
            style("available").green()
        } else {
            style("unavailable").yellow()
        }
    );
    println!(
        "{:<20} {} chars",
        "Minimum text:", config.analysis.min_text_length
    );
    println!(
        "{:<20} {}",
        "Supplementary:", config.analysis.include_supplementary
    );

    Ok(())
}

fn key_status(key: Option<&str>) -> console::StyledObject<&'static str> {
    match key {
        Some(k) if !k.trim().is_empty() => style("key set").green(),
        _ => style("key missing").yellow(),
    }
}

fn extract(file: &Path) -> anyhow::Result<String> {
    TextExtractor::new()
        .extract_path(file)
        .with_context(|| format!("Failed to extract text from {}", file.display()))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
