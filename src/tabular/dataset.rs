use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inferred column kind. Cells keep their source text; the kind records
/// what every non-empty cell of the column parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// All non-empty cells parse as integers.
    Integer,
    /// All non-empty cells parse as decimal numbers.
    Decimal,
    /// Anything else.
    Text,
}

/// A named column with its inferred kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header name as it appeared in the source file.
    pub name: String,
    /// Inferred kind.
    pub kind: ColumnKind,
}

/// An arbitrary rectangular table loaded from an external file.
///
/// Transient per upload session; no semantic constraints beyond
/// "non-empty with correctly inferred columns".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularDataset {
    /// Columns in source order.
    pub columns: Vec<Column>,
    /// Data rows; each row has one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl TabularDataset {
    /// Build a dataset from a header row and data rows, inferring column
    /// kinds from the data. Short rows are padded so the table stays
    /// rectangular.
    pub fn from_records(header: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let n_cols = header.len();
        for row in &mut rows {
            row.resize(n_cols, String::new());
        }
        let columns = header
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column {
                kind: infer_kind(rows.iter().map(|r| r[i].as_str())),
                name,
            })
            .collect();
        Self { columns, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column header names in source order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

fn infer_kind<'a>(values: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let cell = if value.parse::<i64>().is_ok() {
            ColumnKind::Integer
        } else if value.parse::<Decimal>().is_ok() {
            ColumnKind::Decimal
        } else {
            return ColumnKind::Text;
        };
        kind = Some(match (kind, cell) {
            (None, c) => c,
            (Some(ColumnKind::Integer), ColumnKind::Integer) => ColumnKind::Integer,
            // Integers mixed with decimals widen to decimal
            _ => ColumnKind::Decimal,
        });
    }
    kind.unwrap_or(ColumnKind::Text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn infers_integer_decimal_and_text() {
        let ds = TabularDataset::from_records(
            row(&["qty", "price", "name"]),
            vec![row(&["1", "9.90", "parafuso"]), row(&["2", "12.00", "porca"])],
        );
        assert_eq!(ds.columns[0].kind, ColumnKind::Integer);
        assert_eq!(ds.columns[1].kind, ColumnKind::Decimal);
        assert_eq!(ds.columns[2].kind, ColumnKind::Text);
    }

    #[test]
    fn integers_widen_to_decimal() {
        let ds = TabularDataset::from_records(
            row(&["v"]),
            vec![row(&["1"]), row(&["2.5"])],
        );
        assert_eq!(ds.columns[0].kind, ColumnKind::Decimal);
    }

    #[test]
    fn empty_cells_are_ignored_for_inference() {
        let ds = TabularDataset::from_records(
            row(&["v"]),
            vec![row(&[""]), row(&["42"])],
        );
        assert_eq!(ds.columns[0].kind, ColumnKind::Integer);
    }

    #[test]
    fn all_empty_column_is_text() {
        let ds = TabularDataset::from_records(row(&["v"]), vec![row(&[""])]);
        assert_eq!(ds.columns[0].kind, ColumnKind::Text);
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = TabularDataset::from_records(
            row(&["a", "b", "c"]),
            vec![row(&["1"])],
        );
        assert_eq!(ds.rows[0].len(), 3);
        assert_eq!(ds.n_cols(), 3);
        assert_eq!(ds.n_rows(), 1);
    }
}
