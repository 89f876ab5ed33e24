//! # lancamento
//!
//! Brazilian NF-e fiscal automation library covering the upload-to-ledger
//! pipeline: NF-e XML parsing, CFOP-based debit/credit mapping, best-effort
//! tabular loading, hybrid ZIP ingestion, integration CSV export, and a
//! Gemini-backed query agent over the loaded data.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use lancamento::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = ParsedInvoice {
//!     access_key: "35240112345678000199550010000001231000001234".into(),
//!     issuer: "Metalúrgica Exemplo Ltda".into(),
//!     cfop: Cfop::new("5102"),
//!     total_value: dec!(1000.00),
//!     source_file: "nota1.xml".into(),
//! };
//!
//! let entries = map_invoices(vec![invoice]);
//! assert_eq!(entries[0].debit_account, "1.01.01.002 - Clientes");
//! assert_eq!(entries[0].amount, dec!(1000.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | CFOP rule table, ledger mapper, data model |
//! | `nfe` | NF-e XML parsing |
//! | `tabular` | Delimited-file loading with encoding/delimiter sniffing |
//! | `xlsx` | Spreadsheet loading via calamine |
//! | `export` | Integration CSV export |
//! | `ingest` | ZIP archive dispatch and hybrid upload handling |
//! | `agent` | Gemini query agent |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "nfe")]
pub mod nfe;

#[cfg(feature = "tabular")]
pub mod tabular;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "ingest")]
pub mod ingest;

#[cfg(feature = "ingest")]
pub mod session;

#[cfg(feature = "agent")]
pub mod agent;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
