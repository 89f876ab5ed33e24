use std::path::Path;
use thiserror::Error;

use super::dataset::TabularDataset;
use super::sniff::sniff_delimited;

/// Errors from the tabular loader.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TabularError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file holds no data rows.
    #[error("empty data file: {0}")]
    Empty(String),

    /// No encoding/delimiter combination produced a usable table.
    #[error("unreadable delimited file (tried UTF-8/Latin-1 with ',' and ';'): {0}")]
    SniffExhausted(String),

    /// The extension names no supported tabular format.
    #[error("unsupported data file extension: {0}")]
    UnsupportedExtension(String),

    /// Spreadsheet reader failure.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(String),
}

/// File extensions routed to the tabular loader.
pub(crate) const TABULAR_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

/// Load a tabular file, dispatching on its extension.
///
/// `.csv` goes through the encoding/delimiter probe; `.xlsx`/`.xls` use
/// the spreadsheet reader (when the `xlsx` feature is enabled).
pub fn load_table(path: &Path) -> Result<TabularDataset, TabularError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => sniff_delimited(path),
        #[cfg(feature = "xlsx")]
        "xlsx" | "xls" => super::sheet::load_sheet(path),
        _ => Err(TabularError::UnsupportedExtension(
            path.display().to_string(),
        )),
    }
}
