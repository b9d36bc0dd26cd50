use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

const DEFAULT_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Per-run inputs. Each flag falls back to an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "relevance",
    about = "Score spreadsheet keywords against a product description with an LLM"
)]
pub struct Cli {
    /// Product identifier (ASIN) to describe
    #[arg(long, env = "RELEVANCE_ASIN")]
    pub asin: String,

    /// Marketplace region code passed to the product API
    #[arg(long, env = "RELEVANCE_REGION", default_value = "IN")]
    pub region: String,

    /// Spreadsheet whose first column holds the keywords
    #[arg(long, env = "RELEVANCE_INPUT")]
    pub input: PathBuf,

    /// Where the scored keyword table is written
    #[arg(long, env = "RELEVANCE_OUTPUT", default_value = "relevance.xlsx")]
    pub output: PathBuf,

    /// Treat the first row of the input sheet as a header and skip it
    #[arg(long, env = "RELEVANCE_HAS_HEADER", default_value_t = false)]
    pub has_header: bool,
}

/// How the model-API key is presented to the completion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelAuth {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `api-key: <key>` (Azure OpenAI deployments)
    ApiKeyHeader,
}

/// Everything a run needs, built once in `main` and passed to each component.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_api_key: String,
    pub product_api_key: String,
    pub chat_url: String,
    pub model_auth: ModelAuth,
    pub model: String,
    pub http_timeout: Duration,
    pub rust_log: String,
    pub asin: String,
    pub region: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub has_header: bool,
}

impl Config {
    /// Combines parsed CLI arguments with credentials and tuning from the environment.
    /// `.env` must already be loaded so clap's env fallbacks can see it.
    pub fn from_env(cli: Cli) -> Result<Self> {
        let model_api_key = require_env("OPENAI_API_KEY")
            .or_else(|_| require_env("AZURE_OPENAI_API_KEY"))
            .context("Set OPENAI_API_KEY (or AZURE_OPENAI_API_KEY) for the completion endpoint")?;
        let chat_url =
            std::env::var("OPENAI_CHAT_URL").unwrap_or_else(|_| DEFAULT_CHAT_URL.to_string());
        let model_auth = auth_for_url(&chat_url);

        Ok(Config {
            model_api_key,
            product_api_key: require_env("RAPIDAPI_KEY")?,
            chat_url,
            model_auth,
            model: std::env::var("RELEVANCE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            http_timeout: Duration::from_secs(
                std::env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse::<u64>()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            asin: cli.asin,
            region: cli.region,
            input_path: cli.input,
            output_path: cli.output,
            has_header: cli.has_header,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Azure deployments authenticate with an `api-key` header instead of a bearer token.
fn auth_for_url(url: &str) -> ModelAuth {
    let host = url
        .split("://")
        .nth(1)
        .unwrap_or(url)
        .split(['/', '?', ':'])
        .next()
        .unwrap_or_default();
    if host.ends_with(".openai.azure.com") {
        ModelAuth::ApiKeyHeader
    } else {
        ModelAuth::Bearer
    }
}
