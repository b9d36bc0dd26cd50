//! One sequential run: read keywords, fetch description, ask the model,
//! normalize the reply, write the table.

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::CompletionModel;
use crate::product::ProductSource;
use crate::relevance::checker::check_relevance;
use crate::relevance::models::RelevanceTable;
use crate::relevance::normalizer::normalize;
use crate::spreadsheet::{read_keywords, write_records};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub keywords_read: usize,
    pub rows_written: usize,
}

pub async fn run(
    config: &Config,
    products: &dyn ProductSource,
    model: &dyn CompletionModel,
) -> Result<RunSummary, AppError> {
    let keywords = read_keywords(&config.input_path, config.has_header)?;
    let description = products
        .fetch_description(&config.asin, &config.region)
        .await?;

    let table = if keywords.is_empty() {
        warn!("No keywords to process; skipping the model call");
        RelevanceTable::empty()
    } else {
        let reply = check_relevance(&keywords, &description, model).await?;
        normalize(&reply)
    };

    if table.is_empty() && !keywords.is_empty() {
        warn!("Model reply produced no rows; writing an empty table");
    }
    info!("Constructed table with {} rows", table.len());

    write_records(&config.output_path, &table)?;

    Ok(RunSummary {
        keywords_read: keywords.len(),
        rows_written: table.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelAuth;
    use crate::llm_client::LlmError;
    use crate::product::{ProductDescription, ProductError};
    use async_trait::async_trait;
    use rust_xlsxwriter::Workbook;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeProducts {
        missing_title: bool,
    }

    #[async_trait]
    impl ProductSource for FakeProducts {
        async fn fetch_description(
            &self,
            _asin: &str,
            _region: &str,
        ) -> Result<ProductDescription, ProductError> {
            if self.missing_title {
                return Err(ProductError::MissingField("title"));
            }
            Ok(ProductDescription::new("Acme Hindi Alphabet Chart".to_string()))
        }
    }

    struct FakeModel {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl FakeModel {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Some(reply),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for FakeModel {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.map(str::to_string).ok_or_else(|| LlmError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            })
        }
    }

    fn config(dir: &Path) -> Config {
        Config {
            model_api_key: "test".to_string(),
            product_api_key: "test".to_string(),
            chat_url: "http://localhost/chat".to_string(),
            model_auth: ModelAuth::Bearer,
            model: "gpt-4".to_string(),
            http_timeout: Duration::from_secs(1),
            rust_log: "info".to_string(),
            asin: "B009GCTZWC".to_string(),
            region: "IN".to_string(),
            input_path: dir.join("keywords.xlsx"),
            output_path: dir.join("relevance.xlsx"),
            has_header: false,
        }
    }

    fn write_keywords(path: &Path, keywords: &[&str]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (i, keyword) in keywords.iter().enumerate() {
            sheet.write_string(i as u32, 0, *keyword).unwrap();
        }
        workbook.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_run_writes_normalized_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        write_keywords(&config.input_path, &["hindi chart", "acme"]);
        let model = FakeModel::replying(
            r#"{"keywords": [
                {"Keyword": "hindi chart", "Relevance Score": 9, "Category": "Shop Intent", "Search Intent Cohort Classification": "charts"},
                {"Keyword": "acme", "Relevance Score": 4, "Category": "Brand", "Search Intent Cohort Classification": "brand"}
            ]}"#,
        );

        let summary = run(&config, &FakeProducts { missing_title: false }, &model)
            .await
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                keywords_read: 2,
                rows_written: 2
            }
        );
        assert!(config.output_path.exists());
    }

    #[tokio::test]
    async fn test_unparseable_reply_still_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        write_keywords(&config.input_path, &["pen"]);
        let model = FakeModel::replying("not json at all");

        let summary = run(&config, &FakeProducts { missing_title: false }, &model)
            .await
            .unwrap();

        assert_eq!(summary.rows_written, 0);
        assert!(config.output_path.exists());
    }

    #[tokio::test]
    async fn test_no_keywords_skips_model_call() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        write_keywords(&config.input_path, &[]);
        let model = FakeModel::replying("{}");

        let summary = run(&config, &FakeProducts { missing_title: false }, &model)
            .await
            .unwrap();

        assert_eq!(summary.keywords_read, 0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert!(config.output_path.exists());
    }

    #[tokio::test]
    async fn test_missing_title_aborts_before_model_call() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        write_keywords(&config.input_path, &["pen"]);
        let model = FakeModel::replying("{}");

        let err = run(&config, &FakeProducts { missing_title: true }, &model)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Product(ProductError::MissingField("title"))
        ));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn test_model_failure_is_typed_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        write_keywords(&config.input_path, &["pen"]);

        let err = run(
            &config,
            &FakeProducts { missing_title: false },
            &FakeModel::failing(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Llm(LlmError::Api { status: 401, .. })));
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn test_unreadable_input_is_spreadsheet_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let model = FakeModel::replying("{}");

        let err = run(&config, &FakeProducts { missing_title: false }, &model)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Spreadsheet(_)));
    }
}
