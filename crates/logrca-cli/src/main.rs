// logrca CLI - log summaries and root cause analysis from the terminal

use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};
use serde::Deserialize;
use std::io::{self, Write};

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(name = "logrca")]
#[command(version = "0.1.0")]
#[command(about = "Log summaries and root cause analysis", long_about = None)]
struct Cli {
    /// API server URL
    #[arg(short, long, env = "LOGRCA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a service's recent logs
    Summarize {
        /// Service name as labelled in Loki
        service: String,
    },

    /// Ask why a service misbehaved
    Ask {
        /// Question naming the service, e.g. "Why did the checkout-service fail yesterday?"
        question: String,
    },

    /// Check that the API server is up
    Status,
}

// API Response types
#[derive(Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Deserialize)]
struct RcaResponse {
    service: String,
    time_range: TimeRange,
    analysis: String,
}

#[derive(Deserialize)]
struct TimeRange {
    start: String,
    end: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api_url = cli.api_url.trim_end_matches('/');

    match cli.command {
        Commands::Summarize { service } => {
            summarize(&client, api_url, &service).await?;
        }
        Commands::Ask { question } => {
            ask(&client, api_url, &question).await?;
        }
        Commands::Status => {
            check_status(&client, api_url).await?;
        }
    }

    Ok(())
}

fn analyze_url(api_url: &str, service: &str) -> String {
    format!("{}/analyze_logs?service={}", api_url, urlencoding::encode(service))
}

fn chat_rca_url(api_url: &str, question: &str) -> String {
    format!("{}/chat_rca?question={}", api_url, urlencoding::encode(question))
}

// server error bodies are {"error": ..., "code": ...}; fall back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string())
}

async fn summarize(
    client: &reqwest::Client,
    api_url: &str,
    service: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n{} {}", "Summarizing logs for".cyan().bold(), service.magenta());
    println!("{}", "-".repeat(50).dimmed());

    let response = client.get(analyze_url(api_url, service)).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await?;
        println!("{} ({}) {}", "Error:".red().bold(), status, error_message(&body));
        return Ok(());
    }

    let result: SummaryResponse = response.json().await?;

    println!("\n{}", "Summary:".green().bold());
    println!("{}", result.summary);

    Ok(())
}

async fn ask(
    client: &reqwest::Client,
    api_url: &str,
    question: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("\n{}", "Running root cause analysis...".cyan().bold());
    println!("{}", "-".repeat(50).dimmed());

    let response = client.get(chat_rca_url(api_url, question)).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await?;
        println!("{} ({}) {}", "Error:".red().bold(), status, error_message(&body));
        return Ok(());
    }

    let result: RcaResponse = response.json().await?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Service", "From", "To"]);
    table.add_row(vec![
        result.service.clone(),
        result.time_range.start.clone(),
        result.time_range.end.clone(),
    ]);
    println!("{table}");

    println!("\n{}", "Analysis:".green().bold());
    println!("{}", result.analysis);

    Ok(())
}

async fn check_status(
    client: &reqwest::Client,
    api_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    print!("  API Server ({})... ", api_url);
    io::stdout().flush()?;

    match client.get(format!("{}/health", api_url)).send().await {
        Ok(resp) if resp.status().is_success() => {
            println!("{}", "Running".green());
        }
        Ok(resp) => {
            println!("{} ({})", "Error".red(), resp.status());
        }
        Err(e) => {
            println!("{} ({})", "Down".red(), e);
        }
    }

    Ok(())
}
