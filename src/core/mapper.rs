//! Ledger mapper — invoices in, postings out.

use super::rules::rule_for;
use super::types::{LedgerEntry, ParsedInvoice, UNMAPPED_ACCOUNT};

/// Derive one [`LedgerEntry`] per invoice.
///
/// Pure, order-preserving, cardinality-preserving: n invoices always
/// yield n entries in the same relative order. A CFOP with a rule-table
/// match copies both account identifiers from the rule; any other CFOP
/// posts both sides to the unmapped sentinel. The posting amount always
/// mirrors the invoice total — no rounding beyond the input's own
/// decimal precision.
pub fn map_invoices(invoices: Vec<ParsedInvoice>) -> Vec<LedgerEntry> {
    invoices
        .into_iter()
        .map(|invoice| {
            let (debit, credit) = match rule_for(&invoice.cfop) {
                Some(rule) => (rule.debit.to_string(), rule.credit.to_string()),
                None => (UNMAPPED_ACCOUNT.to_string(), UNMAPPED_ACCOUNT.to_string()),
            };
            let amount = invoice.total_value;
            LedgerEntry {
                invoice,
                debit_account: debit,
                credit_account: credit,
                amount,
            }
        })
        .collect()
}

/// Count entries whose CFOP had no rule-table match.
///
/// Equals exactly the number of input invoices with an unmapped CFOP —
/// used for reporting, never for corrective action.
pub fn unmapped_count(entries: &[LedgerEntry]) -> usize {
    entries.iter().filter(|e| e.is_unmapped()).count()
}
