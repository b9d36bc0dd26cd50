use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::info;

use crate::relevance::models::Keyword;
use crate::spreadsheet::SpreadsheetError;

const SUPPORTED_EXTENSIONS: [&str; 6] = ["xlsx", "xlsm", "xlsb", "xls", "xla", "ods"];

/// Reads the first column of the first worksheet as keywords.
/// Cells are kept exactly as read; only cells with no value at all are skipped.
pub fn read_keywords(path: &Path, skip_header: bool) -> Result<Vec<Keyword>, SpreadsheetError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(SpreadsheetError::UnsupportedFormat(extension));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)??;

    let keywords: Vec<Keyword> = range
        .rows()
        .skip(usize::from(skip_header))
        .filter_map(|row| row.first())
        .filter_map(cell_to_keyword)
        .collect();

    info!("Read {} keywords from {}", keywords.len(), path.display());
    Ok(keywords)
}

fn cell_to_keyword(cell: &Data) -> Option<Keyword> {
    match cell {
        Data::Empty => None,
        _ => Some(Keyword(cell.to_string())),
    }
}
