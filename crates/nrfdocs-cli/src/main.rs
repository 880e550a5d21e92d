#![deny(unsafe_code)]

//! nrfdocs CLI — Nordic documentation search served over MCP.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nrfdocs_core::enhance::{QueryContext, ResultType, enhance_query};
use nrfdocs_core::format::format_response;
use nrfdocs_core::mcp::{McpServer, serve_stdio};
use nrfdocs_core::upstream::{AnswerSource, create_source};

/// nrfdocs — Nordic Semiconductor documentation search over MCP.
#[derive(Parser)]
#[command(name = "nrfdocs", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "nrfdocs.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio.
    Serve,

    /// Run one search directly, bypassing the protocol layer.
    Query {
        /// Search query or API function name.
        query: String,

        /// SDK version to target (e.g. "nRF5 SDK v17.1.0").
        #[arg(long)]
        sdk_version: Option<String>,

        /// Result filter: api_reference, code_example, or both.
        #[arg(long, value_parser = parse_result_type)]
        result_type: Option<ResultType>,
    },

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing subscriber with verbosity level. Logs go to stderr:
    // stdout is the protocol channel when serving.
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve => cmd_serve(&cli.config).await?,
        Commands::Query {
            query,
            sdk_version,
            result_type,
        } => cmd_query(&cli.config, &query, sdk_version, result_type).await?,
        Commands::Config { show } => cmd_config(&cli.config, show).await?,
    }

    Ok(())
}

async fn cmd_serve(config_path: &Path) -> Result<()> {
    let config = load_config(config_path).await?;
    info!("Starting nrfdocs MCP server");

    let source = create_source(&config.upstream)?;
    let server = McpServer::new(source);
    serve_stdio(server).await?;

    Ok(())
}

async fn cmd_query(
    config_path: &Path,
    query: &str,
    sdk_version: Option<String>,
    result_type: Option<ResultType>,
) -> Result<()> {
    let config = load_config(config_path).await?;
    let source = create_source(&config.upstream)?;

    let context = QueryContext {
        sdk_version,
        result_type,
    };
    let enhanced = enhance_query(query, &context);
    let answer = source.ask(&enhanced).await?;
    let formatted = format_response(&answer.text, result_type.unwrap_or_default());

    println!("{}", serde_json::to_string_pretty(&formatted)?);
    Ok(())
}

async fn cmd_config(config_path: &Path, show: bool) -> Result<()> {
    let config = load_config(config_path).await?;
    if show {
        let toml_str =
            toml::to_string_pretty(&config).map_err(|e| anyhow::anyhow!("TOML error: {e}"))?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

async fn load_config(path: &Path) -> Result<nrfdocs_config::AppConfig> {
    if path.exists() {
        Ok(nrfdocs_config::AppConfig::load(path).await?)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        Ok(nrfdocs_config::AppConfig::default())
    }
}

fn parse_result_type(s: &str) -> Result<ResultType, String> {
    match s {
        "api_reference" => Ok(ResultType::ApiReference),
        "code_example" => Ok(ResultType::CodeExample),
        "both" => Ok(ResultType::Both),
        other => Err(format!(
            "invalid result type {other:?} (expected api_reference, code_example, or both)"
        )),
    }
}
