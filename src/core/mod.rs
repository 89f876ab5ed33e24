//! Core fiscal data model, CFOP rule table, and ledger mapper.
//!
//! This module provides the foundational types for deriving simplified
//! double-entry postings from parsed NF-e documents.

mod error;
mod mapper;
mod rules;
mod types;

pub use error::*;
pub use mapper::*;
pub use rules::*;
pub use types::*;
