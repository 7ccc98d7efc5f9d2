//! ToxScreen CLI
//!
//! Command-line client for the screening server, for administration and
//! quick checks without opening the browser UI.

#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ToxScreen CLI
#[derive(Parser)]
#[command(name = "toxscreen-cli")]
#[command(author, version, about = "ToxScreen toxic-text screening CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a piece of text
    Screen {
        /// Text to classify
        text: String,

        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Check server readiness
    Status {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// List available models
    Models {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Screen { text, url } => screen(&url, &text).await,
        Commands::Status { url } => status(&url).await,
        Commands::Models { url } => models(&url).await,
    }
}

async fn screen(url: &str, text: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{url}/v1/screen"))
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await?;

    let status = response.status();
    let body: Value = response.json().await?;

    if !status.is_success() {
        anyhow::bail!(
            "Server returned {status}: {}",
            body["error"].as_str().unwrap_or("unknown error")
        );
    }

    println!("{}", serde_json::to_string_pretty(&body)?);

    if body["alert"] == Value::Bool(true) {
        println!("POTENCIAL AGRESIÓN");
    }

    Ok(())
}

async fn status(url: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let response = client.get(format!("{url}/ready")).send().await?;
    let body: Value = response.json().await?;

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn models(url: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let response = client.get(format!("{url}/v1/models")).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("Server returned {}", response.status());
    }

    let body: Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
