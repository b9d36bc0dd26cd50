// Spreadsheet I/O: keyword input via calamine, scored table output via rust_xlsxwriter.

pub mod reader;
pub mod writer;

use thiserror::Error;

pub use reader::read_keywords;
pub use writer::write_records;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// No reader is available for this file type.
    #[error("Unsupported spreadsheet format '{0}' (expected xlsx, xlsm, xlsb, xls or ods)")]
    UnsupportedFormat(String),

    #[error("Unable to read spreadsheet: {0}")]
    Read(#[from] calamine::Error),

    #[error("The workbook does not contain any worksheets")]
    NoWorksheet,

    #[error("Unable to write spreadsheet: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}
