use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::product::{ProductDescription, ProductError, ProductRecord, ProductSource};

const PRODUCT_API_URL: &str = "https://parazun-amazon-data.p.rapidapi.com/product/";
const PRODUCT_API_HOST: &str = "parazun-amazon-data.p.rapidapi.com";

/// RapidAPI product-data client.
#[derive(Clone)]
pub struct ProductClient {
    client: Client,
    api_key: String,
}

impl ProductClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, ProductError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Fetches and decodes the product record for `asin` in `region`.
    pub async fn fetch_record(
        &self,
        asin: &str,
        region: &str,
    ) -> Result<ProductRecord, ProductError> {
        let response = self
            .client
            .get(PRODUCT_API_URL)
            .query(&[("asin", asin), ("region", region)])
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", PRODUCT_API_HOST)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProductError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        let record = ProductRecord::from_json(&body)?;
        debug!(
            "Product {asin} ({region}): {} images, answered questions present: {}",
            record.image_count,
            !record.answered_questions.is_empty()
        );
        Ok(record)
    }
}

#[async_trait]
impl ProductSource for ProductClient {
    async fn fetch_description(
        &self,
        asin: &str,
        region: &str,
    ) -> Result<ProductDescription, ProductError> {
        let record = self.fetch_record(asin, region).await?;
        info!("Fetched product '{}'", record.title);
        Ok(record.to_description())
    }
}
