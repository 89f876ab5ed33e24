use thiserror::Error;

/// Errors that can occur during ledger derivation or export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LancamentoError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failure during export.
    #[cfg(feature = "export")]
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// Export produced non-UTF-8 bytes.
    #[error("export encoding error: {0}")]
    Encoding(String),
}
