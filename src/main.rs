//! Rapport CLI
//!
//! Usage:
//!   rapport --input messages.json                      # Insights
//!   rapport --input messages.json --patterns           # Per-conversation patterns
//!   rapport --input messages.json --json               # Full JSON report
//!   rapport --input messages.json --recognize --user-id me   # LLM pattern recognizer
//!   rapport --serve                                    # HTTP API server

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use rapport::core::{analyze_messages, run_server, AnalysisReport, OpenAiClient, PatternClassifier, PatternRecognizer};
use rapport::types::{AnalyzerInput, NormalizedMessage, Participant, PatternRecognizerResult};
use rapport::{Config, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "rapport",
    version = VERSION,
    about = "Rapport - behavioral patterns in your dating-app conversations",
    long_about = "Rapport reads normalized messages (a JSON array) and reports who\n\
                  talks more, how fast each side replies and how long conversations run.\n\n\
                  Modes:\n  \
                  (default)     Dataset insights\n  \
                  --patterns    Per-conversation imbalance and timing patterns\n  \
                  --recognize   LLM communication-style read (needs RAPPORT_API_KEY)\n  \
                  --serve       HTTP API server mode"
)]
struct Args {
    /// JSON file with an array of normalized messages
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "RAPPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Show per-conversation patterns
    #[arg(short, long)]
    patterns: bool,

    /// Run the LLM pattern recognizer
    #[arg(short, long)]
    recognize: bool,

    /// Id of the person whose export this is (recognizer mode)
    #[arg(long, default_value = "user")]
    user_id: String,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rapport=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(args.config.as_deref()).context("loading configuration")?;

    if args.serve {
        run_server(&args.addr, config.thresholds).await?;
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .context("--input is required unless --serve is given")?;
    let messages = read_messages(input).with_context(|| format!("reading {}", input.display()))?;

    if args.recognize {
        let result = run_recognize(&config, messages, &args.user_id)
            .await
            .context("pattern recognizer failed")?;
        print_recognizer(&result, args.json)?;
        return Ok(());
    }

    let classifier = PatternClassifier::with_thresholds(config.thresholds);
    let report = analyze_messages(&messages, &classifier);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_header(messages.len(), report.conversations.len());
        print_insights(&report, args.no_color);
        if args.patterns {
            print_patterns(&report);
        }
    }
    Ok(())
}

fn read_messages(path: &Path) -> rapport::Result<Vec<NormalizedMessage>> {
    let text = std::fs::read_to_string(path)?;
    let messages: Vec<NormalizedMessage> = serde_json::from_str(&text)?;
    tracing::debug!(path = %path.display(), messages = messages.len(), "read input");
    Ok(messages)
}

async fn run_recognize(
    config: &Config,
    messages: Vec<NormalizedMessage>,
    user_id: &str,
) -> rapport::Result<PatternRecognizerResult> {
    let client = OpenAiClient::from_config(&config.llm).ok_or(rapport::Error::MissingApiKey)??;

    let matches: BTreeSet<String> = messages.iter().map(|m| m.match_id.clone()).collect();
    let participants: BTreeSet<String> = messages.iter().map(|m| m.sender_id.clone()).collect();
    let input = AnalyzerInput {
        messages,
        matches: matches.into_iter().collect(),
        participants: participants
            .into_iter()
            .map(|id| Participant { id, display_name: None })
            .collect(),
        user_id: user_id.to_string(),
    };

    let recognizer = PatternRecognizer::from_config(client, config);
    Ok(recognizer.run(&input, Utc::now()).await?)
}

fn print_header(messages: usize, conversations: usize) {
    println!("{}", format!("Rapport v{}", VERSION).bold());
    println!("{} messages across {} conversations", messages, conversations);
    println!();
}

fn print_insights(report: &AnalysisReport, no_color: bool) {
    for insight in &report.insights {
        if no_color {
            println!("{}", insight.to_parseable_string());
        } else {
            println!("{}", insight.to_terminal_string());
        }
        if let Some(reflection) = &insight.reflection {
            println!("   {}", reflection.italic());
        }
    }
}

fn print_patterns(report: &AnalysisReport) {
    println!();
    println!("{}", "Conversations".bold());
    for conversation in &report.conversations {
        let imbalance = &conversation.patterns.imbalance;
        let timing = conversation
            .patterns
            .timing
            .as_ref()
            .map(|t| format!("{} ({:.0}%)", t.pattern.label(), t.confidence * 100.0))
            .unwrap_or_else(|| "no replies yet".to_string());

        let line = format!(
            "  {:<16} {} ({:.0}%) | {}",
            conversation.match_id,
            imbalance.pattern.label(),
            imbalance.confidence * 100.0,
            timing
        );
        match conversation.insight.severity {
            rapport::types::Severity::Concern => println!("{}", line.yellow()),
            rapport::types::Severity::Positive => println!("{}", line.green()),
            rapport::types::Severity::Neutral => println!("{}", line),
        }
    }
}

fn print_recognizer(result: &PatternRecognizerResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", "Pattern recognizer".bold());
    println!("  style:       {} ({:?})", result.communication_style.primary, result.communication_style.consistency);
    println!("  complexity:  {:.2}", result.complexity_score);
    println!("  summary:     {}", result.summary);
    if result.escalate_to_attachment_evaluator {
        println!("  {}", "→ flagged for deeper attachment evaluation".yellow());
    }
    println!(
        "  {}",
        format!(
            "{} · {} tokens · ${:.4} · {} ms",
            result.metadata.model, result.metadata.tokens_used, result.metadata.cost_usd, result.metadata.duration_ms
        )
        .dimmed()
    );
    Ok(())
}
