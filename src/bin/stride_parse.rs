// ABOUTME: Command-line parser turning a workout description into an activity record
// ABOUTME: Prints the record as JSON, or the failure reason with exit status 2
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # Parse a prompt given as an argument
//! cargo run --bin stride-parse -- "Went for a 45 minute run in the park"
//!
//! # Read the prompt from stdin and show the visited pipeline stages
//! echo "Did some HIIT training for 30 minutes" | cargo run --bin stride-parse -- --stdin --trace
//!
//! # Check that the configured generative service answers
//! cargo run --bin stride-parse -- --check
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::info;

use stride_agent::config::AgentConfig;
use stride_agent::logging::LoggingConfig;
use stride_agent::parsing::ActivityParser;

/// Exit status for prompts that could not be parsed
const PARSE_FAILURE_EXIT: u8 = 2;

#[derive(Parser)]
#[command(
    name = "stride-parse",
    about = "Parse a natural-language workout description into a structured activity",
    long_about = "Parse a natural-language workout description into a structured activity. \
                  Uses the Writer API or a local OpenAI-compatible server and a Weaviate exercise \
                  index when configured, and deterministic rules otherwise."
)]
struct ParseArgs {
    /// Workout description, e.g. "45 minute yoga session at the studio"
    prompt: Option<String>,

    /// Read the description from standard input
    #[arg(long, conflicts_with = "prompt")]
    stdin: bool,

    /// Include the visited pipeline stages in the output
    #[arg(long)]
    trace: bool,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Check the configured services instead of parsing
    #[arg(long, conflicts_with_all = ["prompt", "stdin", "trace"])]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = ParseArgs::parse();
    LoggingConfig::from_env().init()?;

    let config = AgentConfig::from_env().context("Failed to load configuration")?;
    info!("{}", config.summary());
    let parser = ActivityParser::from_config(&config).context("Failed to build parser")?;

    if args.check {
        return check_services(&parser, args.compact).await;
    }

    let prompt = read_prompt(&args).await?;
    let report = parser.parse_with_trace(&prompt).await;

    let (mut output, status) = match &report.result {
        Ok(record) => (serde_json::to_value(record)?, ExitCode::SUCCESS),
        Err(failure) => (
            json!({ "reason": failure.as_str(), "message": failure.to_string() }),
            ExitCode::from(PARSE_FAILURE_EXIT),
        ),
    };
    if args.trace {
        output = json!({
            "outcome": output,
            "stages": report.stages,
            "source": report.source,
            "generative_failure": report.generative_failure,
            "candidate_count": report.candidate_count,
        });
    }

    println!("{}", render(&output, args.compact)?);
    Ok(status)
}

async fn check_services(parser: &ActivityParser, compact: bool) -> Result<ExitCode> {
    let generative = parser.check_generative().await;
    let knowledge_store = if parser.has_knowledge_store() {
        "configured"
    } else {
        "not_configured"
    };
    let output = json!({
        "generative": match generative {
            Some(true) => "healthy",
            Some(false) => "unhealthy",
            None => "not_configured",
        },
        "knowledge_store": knowledge_store,
    });
    println!("{}", render(&output, compact)?);
    Ok(if generative == Some(false) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn read_prompt(args: &ParseArgs) -> Result<String> {
    if args.stdin {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read prompt from stdin")?;
        return Ok(buffer);
    }
    match &args.prompt {
        Some(prompt) => Ok(prompt.clone()),
        None => bail!("Provide a prompt argument or use --stdin"),
    }
}

fn render(value: &Value, compact: bool) -> Result<String> {
    Ok(if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    })
}
