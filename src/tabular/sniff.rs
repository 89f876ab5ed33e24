//! Encoding/delimiter probe for delimited text of unknown dialect.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use log::debug;
use std::path::Path;

use super::dataset::TabularDataset;
use super::loader::TabularError;

/// Candidate encodings, probed in order. The "latin-1" and "iso-8859-1"
/// labels resolve to the same decoder, so the list collapses to two.
const ENCODINGS: &[&Encoding] = &[UTF_8, WINDOWS_1252];

/// Candidate field delimiters, probed in order per encoding.
const DELIMITERS: &[u8] = b",;";

/// Sanity ceiling: a parse with this many columns or more is assumed to
/// be a wrong-delimiter artifact.
const MAX_COLUMNS: usize = 50;

/// Load a delimited text file of unknown encoding and delimiter.
///
/// Probes encodings × delimiters in nested order and accepts the first
/// combination yielding more than one and fewer than [`MAX_COLUMNS`]
/// columns. A single-column result under comma is treated as a probable
/// wrong-delimiter guess and the semicolon retry runs before it can be
/// accepted; it is returned only when no combination does better. An
/// empty file or an exhausted probe is an explicit error, not retried
/// further.
pub fn sniff_delimited(path: &Path) -> Result<TabularDataset, TabularError> {
    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(TabularError::Empty(display_name(path)));
    }

    let mut single_column_fallback: Option<TabularDataset> = None;

    for encoding in ENCODINGS {
        let (text, _, had_errors) = encoding.decode(&bytes);
        if had_errors {
            // Not representable in this encoding; try the next one
            continue;
        }
        for &delimiter in DELIMITERS {
            let Some(dataset) = parse_delimited(&text, delimiter) else {
                continue;
            };
            let n_cols = dataset.n_cols();
            if n_cols > 1 && n_cols < MAX_COLUMNS {
                debug!(
                    "delimited probe accepted: encoding={}, delimiter={:?}, {}x{}",
                    encoding.name(),
                    delimiter as char,
                    dataset.n_rows(),
                    n_cols
                );
                return Ok(dataset);
            }
            if n_cols == 1 && single_column_fallback.is_none() {
                single_column_fallback = Some(dataset);
            }
        }
    }

    single_column_fallback.ok_or_else(|| TabularError::SniffExhausted(display_name(path)))
}

/// Parse decoded text with one delimiter. `None` when the dialect does
/// not fit (ragged rows, no header, no data rows).
fn parse_delimited(text: &str, delimiter: u8) -> Option<TabularDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .ok()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if header.is_empty() {
        return None;
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.ok()?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }
    if rows.is_empty() {
        return None;
    }

    Some(TabularDataset::from_records(header, rows))
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8], ext: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(bytes).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn utf8_comma_accepted_first() {
        let path = write_temp(b"a,b,c\n1,2,3\n4,5,6\n", "csv");
        let ds = sniff_delimited(&path).unwrap();
        assert_eq!(ds.n_cols(), 3);
        assert_eq!(ds.n_rows(), 2);
    }

    #[test]
    fn semicolon_latin1_file_loads() {
        // "preço" and "descrição" in Latin-1 with semicolons
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"pre\xe7o;descri\xe7\xe3o;qtd;total;data\n");
        bytes.extend_from_slice(b"1,50;parafuso;10;15,00;2024-01-01\n");
        bytes.extend_from_slice(b"2,00;porca;5;10,00;2024-01-02\n");
        bytes.extend_from_slice(b"0,75;arruela;100;75,00;2024-01-03\n");
        let path = write_temp(&bytes, "csv");
        let ds = sniff_delimited(&path).unwrap();
        assert_eq!(ds.n_cols(), 5);
        assert_eq!(ds.n_rows(), 3);
        assert_eq!(ds.columns[0].name, "preço");
    }

    #[test]
    fn single_column_under_comma_retries_semicolon() {
        let path = write_temp(b"a;b;c\n1;2;3\n", "csv");
        let ds = sniff_delimited(&path).unwrap();
        assert_eq!(ds.n_cols(), 3);
    }

    #[test]
    fn genuine_single_column_is_fallback_accepted() {
        let path = write_temp(b"nome\njoana\npedro\n", "csv");
        let ds = sniff_delimited(&path).unwrap();
        assert_eq!(ds.n_cols(), 1);
        assert_eq!(ds.n_rows(), 2);
    }

    #[test]
    fn empty_file_fails_explicitly() {
        let path = write_temp(b"", "csv");
        assert!(matches!(
            sniff_delimited(&path),
            Err(TabularError::Empty(_))
        ));
    }

    #[test]
    fn header_only_file_is_exhausted() {
        let path = write_temp(b"a,b,c\n", "csv");
        assert!(matches!(
            sniff_delimited(&path),
            Err(TabularError::SniffExhausted(_))
        ));
    }
}
