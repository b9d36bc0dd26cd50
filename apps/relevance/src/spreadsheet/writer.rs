use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::relevance::models::RelevanceTable;
use crate::spreadsheet::SpreadsheetError;

const SHEET_NAME: &str = "Relevance";

/// Writes the table with a bold header row and no index column.
/// An empty table still produces the header row.
pub fn write_records(path: &Path, table: &RelevanceTable) -> Result<(), SpreadsheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in table.columns().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, record) in table.records().iter().enumerate() {
        let row = (index + 1) as u32;
        sheet.write_string(row, 0, &record.keyword)?;
        sheet.write_number(row, 1, record.relevance_score)?;
        sheet.write_string(row, 2, record.category.as_str())?;
        sheet.write_string(row, 3, &record.cohort)?;
    }

    workbook.save(path)?;
    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
