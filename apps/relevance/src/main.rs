mod config;
mod errors;
mod llm_client;
mod pipeline;
mod product;
mod relevance;
mod spreadsheet;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Cli, Config};
use crate::llm_client::LlmClient;
use crate::product::ProductClient;

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads its env fallbacks
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env(cli)?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting relevance v{}", env!("CARGO_PKG_VERSION"));

    let products = ProductClient::new(config.product_api_key.clone(), config.http_timeout)?;
    let llm = LlmClient::new(
        config.model_api_key.clone(),
        config.chat_url.clone(),
        config.model_auth,
        config.model.clone(),
        config.http_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    match pipeline::run(&config, &products, &llm).await {
        Ok(summary) => {
            info!(
                keywords = summary.keywords_read,
                rows = summary.rows_written,
                "Wrote {}",
                config.output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!(code = e.code(), "Run failed: {e}");
            Err(e.into())
        }
    }
}
