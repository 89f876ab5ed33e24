//! Static CFOP → ledger-account rule table.
//!
//! Process-wide, read-only configuration: one debit/credit pair per known
//! CFOP. Extending this table is the onboarding mechanism for new
//! transaction types — there is no runtime mutation. A CFOP with no row
//! here is a valid, expected state and maps to the unmapped sentinel
//! downstream, not an error.

use super::types::{AccountRule, Cfop};

/// One rule-table row.
#[derive(Debug, Clone, Copy)]
pub struct CfopRule {
    /// 4-digit CFOP this rule applies to.
    pub cfop: &'static str,
    /// Debit/credit pair posted for the CFOP.
    pub rule: AccountRule,
}

/// CFOP families mapped by the simplified industrial chart of accounts.
///
/// Sales (5xxx intra-state, 6xxx interstate), purchases (1xxx intra-state,
/// 2xxx interstate), returns, and transfers.
const CFOP_RULES: &[CfopRule] = &[
    // Sales of own production / resale
    CfopRule {
        cfop: "5101",
        rule: AccountRule {
            debit: "1.01.01.002 - Clientes",
            credit: "3.01.01.001 - Receita de Vendas",
        },
    },
    CfopRule {
        cfop: "5102",
        rule: AccountRule {
            debit: "1.01.01.002 - Clientes",
            credit: "3.01.01.001 - Receita de Vendas",
        },
    },
    CfopRule {
        cfop: "5405",
        rule: AccountRule {
            debit: "1.01.01.002 - Clientes",
            credit: "3.01.01.002 - Receita de Vendas ST",
        },
    },
    CfopRule {
        cfop: "6101",
        rule: AccountRule {
            debit: "1.01.01.002 - Clientes",
            credit: "3.01.01.001 - Receita de Vendas",
        },
    },
    CfopRule {
        cfop: "6102",
        rule: AccountRule {
            debit: "1.01.01.002 - Clientes",
            credit: "3.01.01.001 - Receita de Vendas",
        },
    },
    CfopRule {
        cfop: "6108",
        rule: AccountRule {
            debit: "1.01.01.002 - Clientes",
            credit: "3.01.01.001 - Receita de Vendas",
        },
    },
    // Purchases for industrialization / resale
    CfopRule {
        cfop: "1101",
        rule: AccountRule {
            debit: "1.01.03.002 - Estoque de Matéria-Prima",
            credit: "2.01.01.001 - Fornecedores Nacionais",
        },
    },
    CfopRule {
        cfop: "1102",
        rule: AccountRule {
            debit: "1.01.03.001 - Estoque de Mercadorias",
            credit: "2.01.01.001 - Fornecedores Nacionais",
        },
    },
    CfopRule {
        cfop: "2101",
        rule: AccountRule {
            debit: "1.01.03.002 - Estoque de Matéria-Prima",
            credit: "2.01.01.001 - Fornecedores Nacionais",
        },
    },
    CfopRule {
        cfop: "2102",
        rule: AccountRule {
            debit: "1.01.03.001 - Estoque de Mercadorias",
            credit: "2.01.01.001 - Fornecedores Nacionais",
        },
    },
    // Consumables and utilities
    CfopRule {
        cfop: "1556",
        rule: AccountRule {
            debit: "3.02.01.001 - Material de Uso e Consumo",
            credit: "2.01.01.001 - Fornecedores Nacionais",
        },
    },
    CfopRule {
        cfop: "1253",
        rule: AccountRule {
            debit: "3.02.01.002 - Energia Elétrica",
            credit: "2.01.01.001 - Fornecedores Nacionais",
        },
    },
    // Returns
    CfopRule {
        cfop: "1202",
        rule: AccountRule {
            debit: "3.01.02.001 - Devoluções de Vendas",
            credit: "1.01.01.002 - Clientes",
        },
    },
    CfopRule {
        cfop: "5202",
        rule: AccountRule {
            debit: "2.01.01.001 - Fornecedores Nacionais",
            credit: "1.01.03.001 - Estoque de Mercadorias",
        },
    },
    // Stock transfers between establishments
    CfopRule {
        cfop: "5152",
        rule: AccountRule {
            debit: "1.01.03.004 - Estoque em Filiais",
            credit: "1.01.03.001 - Estoque de Mercadorias",
        },
    },
    // Bonification / free-sample shipments
    CfopRule {
        cfop: "5910",
        rule: AccountRule {
            debit: "3.02.01.003 - Despesas com Bonificações",
            credit: "1.01.03.001 - Estoque de Mercadorias",
        },
    },
];

/// Look up the account rule for a CFOP. Exact string match; `None` for
/// any code the table does not carry.
pub fn rule_for(cfop: &Cfop) -> Option<&'static AccountRule> {
    CFOP_RULES
        .iter()
        .find(|r| r.cfop == cfop.as_str())
        .map(|r| &r.rule)
}

/// All CFOPs the table currently maps, in table order.
pub fn mapped_cfops() -> impl Iterator<Item = &'static str> {
    CFOP_RULES.iter().map(|r| r.cfop)
}
