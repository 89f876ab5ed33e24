use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder issuer name when the NF-e carries no `emit/xNome` element.
pub const UNKNOWN_ISSUER: &str = "Emitente Desconhecido";

/// Sentinel account identifier meaning "no rule matched this CFOP".
///
/// Distinguishable from every real chart-of-accounts identifier (real
/// accounts always start with a numeric prefix such as `1.01.01.002`).
/// Use [`LedgerEntry::is_unmapped`] instead of comparing against this
/// literal directly.
pub const UNMAPPED_ACCOUNT: &str = "Regra Não Mapeada";

/// CFOP — Código Fiscal de Operações e Prestações.
///
/// A 4-character code classifying the nature of a commercial operation
/// (sale, purchase, transfer, return, …), externally defined by the tax
/// authority. Used only as an exact-match lookup key; no normalization
/// beyond string coercion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cfop(String);

impl Cfop {
    /// CFOP recorded when a document carries no line-item CFOP at all.
    pub const UNSPECIFIED: &'static str = "0000";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cfop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cfop {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Debit/credit account pair for one CFOP, per the chart-of-accounts
/// numbering convention (e.g. `1.01.01.002 - Clientes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRule {
    /// Account debited by the posting.
    pub debit: &'static str,
    /// Account credited by the posting.
    pub credit: &'static str,
}

/// One record per successfully parsed NF-e document.
///
/// Immutable after creation. A document that fails required-field
/// extraction yields no record at all — see [`crate::nfe::NfeOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInvoice {
    /// 44-digit NF-e access key (`infNFe@Id` with the `NFe` prefix
    /// stripped). Empty when the attribute is absent.
    pub access_key: String,
    /// Issuer name (`emit/xNome`), or [`UNKNOWN_ISSUER`].
    pub issuer: String,
    /// CFOP of the *first* line item. Multi-item invoices with
    /// heterogeneous CFOPs are classified by their first item only.
    pub cfop: Cfop,
    /// Declared total invoice value (`ICMSTot/vNF`); zero when absent
    /// or unparsable.
    pub total_value: Decimal,
    /// Basename of the XML file the record came from.
    pub source_file: String,
}

/// A [`ParsedInvoice`] enriched with resolved ledger accounts.
///
/// Produced in bulk by [`crate::core::map_invoices`] — one entry per
/// invoice, no merging or netting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The invoice this posting was derived from.
    pub invoice: ParsedInvoice,
    /// Resolved debit account, or [`UNMAPPED_ACCOUNT`].
    pub debit_account: String,
    /// Resolved credit account, or [`UNMAPPED_ACCOUNT`].
    pub credit_account: String,
    /// Posting value. Mirrors `invoice.total_value` unconditionally —
    /// no tax or withholding computation.
    pub amount: Decimal,
}

impl LedgerEntry {
    /// Whether this entry's CFOP had no rule-table match.
    pub fn is_unmapped(&self) -> bool {
        self.debit_account == UNMAPPED_ACCOUNT
    }
}
