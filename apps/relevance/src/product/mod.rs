// Product Description Fetcher: one product-data API call per run, flattened into text for the prompt.

pub mod client;
pub mod description;

use async_trait::async_trait;
use thiserror::Error;

pub use client::ProductClient;
pub use description::{ProductDescription, ProductRecord};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Anything that can describe a product by identifier and region.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_description(
        &self,
        asin: &str,
        region: &str,
    ) -> Result<ProductDescription, ProductError>;
}
