use thiserror::Error;

use crate::llm_client::LlmError;
use crate::product::ProductError;
use crate::spreadsheet::SpreadsheetError;

/// Application-level error type.
/// Every stage of a run returns one of these so `main` decides what to do with it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] SpreadsheetError),

    #[error("Product API error: {0}")]
    Product(#[from] ProductError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl AppError {
    /// Short machine-readable code, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Spreadsheet(SpreadsheetError::UnsupportedFormat(_)) => "MISSING_READER",
            AppError::Spreadsheet(SpreadsheetError::Write(_)) => "WRITE_ERROR",
            AppError::Spreadsheet(_) => "READ_ERROR",
            AppError::Product(ProductError::MissingField(_)) => "MISSING_FIELD",
            AppError::Product(_) => "PRODUCT_REQUEST_FAILED",
            AppError::Llm(_) => "LLM_REQUEST_FAILED",
        }
    }
}
