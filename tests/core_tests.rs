#![cfg(feature = "core")]

use lancamento::core::*;
use rust_decimal_macros::dec;

fn invoice(cfop: &str, total: rust_decimal::Decimal) -> ParsedInvoice {
    ParsedInvoice {
        access_key: format!("3524{cfop}000000000000000000000000000000000000"),
        issuer: "Metalurgica Exemplo Ltda".into(),
        cfop: Cfop::new(cfop),
        total_value: total,
        source_file: format!("nota_{cfop}.xml"),
    }
}

#[test]
fn every_table_cfop_maps_to_its_rule() {
    for cfop in mapped_cfops() {
        let rule = rule_for(&Cfop::new(cfop)).unwrap();
        let entries = map_invoices(vec![invoice(cfop, dec!(10))]);
        assert_eq!(entries[0].debit_account, rule.debit);
        assert_eq!(entries[0].credit_account, rule.credit);
        assert!(!entries[0].is_unmapped());
    }
}

#[test]
fn absent_cfops_map_to_the_sentinel_on_both_sides() {
    for cfop in ["0000", "9999", "5103x", ""] {
        let entries = map_invoices(vec![invoice(cfop, dec!(10))]);
        assert_eq!(entries[0].debit_account, UNMAPPED_ACCOUNT);
        assert_eq!(entries[0].credit_account, UNMAPPED_ACCOUNT);
    }
}

#[test]
fn sale_5102_posts_clients_against_revenue() {
    let entries = map_invoices(vec![invoice("5102", dec!(1000.00))]);
    let entry = &entries[0];
    assert_eq!(entry.debit_account, "1.01.01.002 - Clientes");
    assert_eq!(entry.credit_account, "3.01.01.001 - Receita de Vendas");
    assert_eq!(entry.amount, dec!(1000.00));
}

#[test]
fn amount_always_mirrors_the_invoice_total() {
    let totals = [dec!(0), dec!(0.01), dec!(123.456), dec!(98765.43)];
    for total in totals {
        let entries = map_invoices(vec![invoice("1101", total)]);
        assert_eq!(entries[0].amount, total);
        assert_eq!(entries[0].invoice.total_value, total);
    }
}

#[test]
fn mapping_is_deterministic() {
    let input = vec![
        invoice("5102", dec!(1)),
        invoice("9999", dec!(2)),
        invoice("1101", dec!(3)),
    ];
    let first = map_invoices(input.clone());
    let second = map_invoices(input);
    assert_eq!(first, second);
}

#[test]
fn unmapped_count_is_the_audit_invariant() {
    let input = vec![
        invoice("5102", dec!(1)),
        invoice("7777", dec!(2)),
        invoice("1101", dec!(3)),
        invoice("8888", dec!(4)),
    ];
    let expected = input
        .iter()
        .filter(|i| rule_for(&i.cfop).is_none())
        .count();
    let entries = map_invoices(input);
    assert_eq!(unmapped_count(&entries), expected);
    assert_eq!(unmapped_count(&entries), 2);
}
