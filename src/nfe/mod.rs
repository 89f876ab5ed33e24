//! NF-e (Nota Fiscal Eletrônica) XML parsing.
//!
//! Best-effort extraction of the fiscal fields the ledger mapper needs.
//! Parsing never fails with an `Err`: each document yields either a
//! [`crate::core::ParsedInvoice`] or a tagged [`UnparseableReason`], so a
//! batch of N documents with K bad ones produces N−K records and an
//! aggregate [`BatchReport`].
//!
//! # Example
//!
//! ```ignore
//! use lancamento::nfe::*;
//!
//! let (invoices, report) = parse_batch(xml_paths);
//! println!("{} parsed, {} skipped", report.parsed, report.skipped());
//! ```

mod parse;

pub use parse::{BatchReport, NFE_NAMESPACE, NfeOutcome, UnparseableReason, parse_batch, parse_file, parse_xml};
