//! Best-effort tabular loading for files of ambiguous dialect.
//!
//! Delimited text goes through an encoding/delimiter probe; spreadsheets
//! are self-describing and bypass it. The result is a rectangular
//! [`TabularDataset`] with named columns and inferred per-column kinds.
//!
//! # Example
//!
//! ```ignore
//! use lancamento::tabular::load_table;
//!
//! let dataset = load_table(Path::new("dados.csv"))?;
//! println!("{} rows × {} columns", dataset.n_rows(), dataset.n_cols());
//! ```

mod dataset;
mod loader;
#[cfg(feature = "xlsx")]
mod sheet;
mod sniff;

pub use dataset::{Column, ColumnKind, TabularDataset};
pub use loader::{TabularError, load_table};
pub(crate) use loader::TABULAR_EXTENSIONS;
#[cfg(feature = "xlsx")]
pub use sheet::load_sheet;
pub use sniff::sniff_delimited;
