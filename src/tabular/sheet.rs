//! Spreadsheet loading. The format is self-describing, so the
//! encoding/delimiter probe is bypassed entirely.

use calamine::{Data, Reader};
use std::path::Path;

use super::dataset::TabularDataset;
use super::loader::TabularError;

/// Load the first worksheet of an `.xlsx`/`.xls` workbook.
///
/// The first row is the header; remaining rows are data. An empty
/// workbook or worksheet is an explicit error.
pub fn load_sheet(path: &Path) -> Result<TabularDataset, TabularError> {
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| TabularError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TabularError::Spreadsheet("workbook has no worksheets".into()))?
        .map_err(|e| TabularError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(cell_to_string).collect(),
        None => return Err(TabularError::Empty(path.display().to_string())),
    };

    let data: Vec<Vec<String>> = rows
        .map(|cells| cells.iter().map(cell_to_string).collect())
        .collect();
    if data.is_empty() {
        return Err(TabularError::Empty(path.display().to_string()));
    }

    Ok(TabularDataset::from_records(header, data))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole-number floats render without the trailing ".0"
            if f.fract() == 0.0 && f.abs() < 1e15 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
