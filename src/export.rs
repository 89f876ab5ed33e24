//! Integration CSV export.
//!
//! Both exports are UTF-8, comma-delimited, with a header row and no
//! index column. The ledger column set is the downstream integration
//! contract; do not reorder it.

use crate::core::{LancamentoError, LedgerEntry};

#[cfg(feature = "tabular")]
use crate::tabular::TabularDataset;

/// Ledger export header, in contract order.
const LEDGER_HEADER: [&str; 6] = [
    "NFe_Chave",
    "Emissor",
    "CFOP_Principal",
    "Conta_Debito",
    "Conta_Credito",
    "Valor_Lancamento",
];

/// Serialize ledger entries to the integration CSV format.
pub fn ledger_csv(entries: &[LedgerEntry]) -> Result<String, LancamentoError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(LEDGER_HEADER)?;
    for entry in entries {
        writer.write_record([
            entry.invoice.access_key.as_str(),
            entry.invoice.issuer.as_str(),
            entry.invoice.cfop.as_str(),
            entry.debit_account.as_str(),
            entry.credit_account.as_str(),
            &entry.amount.to_string(),
        ])?;
    }
    into_utf8(writer)
}

/// Serialize a loaded dataset back out as CSV, exactly as loaded.
#[cfg(feature = "tabular")]
pub fn dataset_csv(dataset: &TabularDataset) -> Result<String, LancamentoError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(dataset.column_names())?;
    for row in &dataset.rows {
        writer.write_record(row)?;
    }
    into_utf8(writer)
}

fn into_utf8(writer: csv::Writer<Vec<u8>>) -> Result<String, LancamentoError> {
    let buf = writer
        .into_inner()
        .map_err(|e| LancamentoError::Encoding(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| LancamentoError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cfop, ParsedInvoice, map_invoices};
    use rust_decimal_macros::dec;

    fn entries() -> Vec<LedgerEntry> {
        map_invoices(vec![ParsedInvoice {
            access_key: "352401".into(),
            issuer: "Metalurgica Exemplo".into(),
            cfop: Cfop::new("5102"),
            total_value: dec!(1000.00),
            source_file: "nota1.xml".into(),
        }])
    }

    #[test]
    fn ledger_header_is_the_integration_contract() {
        let csv = ledger_csv(&entries()).unwrap();
        let first_line = csv.lines().next().unwrap();
        assert_eq!(
            first_line,
            "NFe_Chave,Emissor,CFOP_Principal,Conta_Debito,Conta_Credito,Valor_Lancamento"
        );
    }

    #[test]
    fn ledger_row_carries_accounts_and_amount() {
        let csv = ledger_csv(&entries()).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("352401"));
        assert!(row.contains("1.01.01.002 - Clientes"));
        assert!(row.contains("3.01.01.001 - Receita de Vendas"));
        assert!(row.contains("1000.00"));
    }

    #[test]
    fn empty_ledger_exports_header_only() {
        let csv = ledger_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[cfg(feature = "tabular")]
    #[test]
    fn dataset_roundtrips_header_and_rows() {
        let ds = TabularDataset::from_records(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "x".into()]],
        );
        let csv = dataset_csv(&ds).unwrap();
        assert_eq!(csv, "a,b\n1,x\n");
    }
}
