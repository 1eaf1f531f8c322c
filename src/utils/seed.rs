//! Standard chart of accounts and sample masters for new books

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::chart::*;
use crate::documents::{DocumentBuilder, DocumentKind, ItemDraft, Product};
use crate::tax::{GstSlab, TaxRate};
use crate::traits::BookStorage;
use crate::types::*;

pub const CASH_IN_HAND: &str = "la-1.01.1.001";
pub const BANK_ACCOUNT: &str = "la-1.01.1.002";
pub const TRADE_DEBTORS: &str = "la-1.01.2.001";
pub const INPUT_GST: &str = "la-1.01.3.001";
pub const OFFICE_EQUIPMENT: &str = "la-1.02.1.001";
pub const TRADE_CREDITORS: &str = "la-2.01.1.001";
pub const OUTPUT_GST: &str = "la-2.01.2.001";
pub const CAPITAL_ACCOUNT: &str = "la-3.01.1.001";
pub const SALES_ACCOUNT: &str = "la-4.01.1.001";
pub const PURCHASE_ACCOUNT: &str = "la-5.01.1.001";
pub const RENT: &str = "la-5.02.1.001";

/// (code, name, account type)
const CONTROL_GROUPS: &[(&str, &str, AccountType)] = &[
    ("1", "Assets", AccountType::Asset),
    ("2", "Liabilities", AccountType::Liability),
    ("3", "Equity", AccountType::Equity),
    ("4", "Income", AccountType::Income),
    ("5", "Expenses", AccountType::Expense),
];

const SUB_CONTROL_GROUPS: &[(&str, &str)] = &[
    ("1.01", "Current Assets"),
    ("1.02", "Fixed Assets"),
    ("2.01", "Current Liabilities"),
    ("3.01", "Capital"),
    ("4.01", "Operating Income"),
    ("5.01", "Direct Expenses"),
    ("5.02", "Indirect Expenses"),
];

const CONTROL_ACCOUNTS: &[(&str, &str)] = &[
    ("1.01.1", "Cash & Bank"),
    ("1.01.2", "Receivables"),
    ("1.01.3", "Tax Credits"),
    ("1.02.1", "Plant & Equipment"),
    ("2.01.1", "Payables"),
    ("2.01.2", "Duties & Taxes"),
    ("3.01.1", "Owner's Capital"),
    ("4.01.1", "Sales"),
    ("5.01.1", "Purchases"),
    ("5.02.1", "Administrative"),
];

/// (code, name, opening balance), debit-positive
const LEDGER_ACCOUNTS: &[(&str, &str, i64)] = &[
    ("1.01.1.001", "Cash in Hand", 50_000),
    ("1.01.1.002", "Bank Account", 150_000),
    ("1.01.2.001", "Trade Debtors", 25_000),
    ("1.01.3.001", "Input GST", 0),
    ("1.02.1.001", "Office Equipment", 75_000),
    ("2.01.1.001", "Trade Creditors", -30_000),
    ("2.01.2.001", "Output GST", 0),
    ("3.01.1.001", "Capital Account", -270_000),
    ("4.01.1.001", "Sales Account", 0),
    ("5.01.1.001", "Purchase Account", 0),
    ("5.02.1.001", "Rent", 0),
];

fn node_id(level: AccountLevel, code: &str) -> String {
    format!("{}-{}", level.id_prefix(), code)
}

/// Code of the parent: everything before the last dot
fn parent_code(code: &str) -> &str {
    code.rsplit_once('.').map_or("", |(parent, _)| parent)
}

/// The standard five-group chart with balanced opening balances
///
/// Ids are derived from codes (`la-1.01.1.001`), so the constants in this
/// module name the seeded ledgers.
pub fn chart_of_accounts() -> Vec<AccountNode> {
    let mut nodes = Vec::new();

    for (code, name, account_type) in CONTROL_GROUPS {
        nodes.push(AccountNode::ControlGroup(ControlGroup {
            id: node_id(AccountLevel::ControlGroup, code),
            code: code.to_string(),
            name: name.to_string(),
            account_type: *account_type,
        }));
    }

    for (code, name) in SUB_CONTROL_GROUPS {
        nodes.push(AccountNode::SubControlGroup(SubControlGroup {
            id: node_id(AccountLevel::SubControlGroup, code),
            code: code.to_string(),
            name: name.to_string(),
            control_group_id: node_id(AccountLevel::ControlGroup, parent_code(code)),
        }));
    }

    for (code, name) in CONTROL_ACCOUNTS {
        nodes.push(AccountNode::ControlAccount(ControlAccount {
            id: node_id(AccountLevel::ControlAccount, code),
            code: code.to_string(),
            name: name.to_string(),
            sub_control_group_id: node_id(AccountLevel::SubControlGroup, parent_code(code)),
        }));
    }

    for (code, name, opening) in LEDGER_ACCOUNTS {
        nodes.push(AccountNode::LedgerAccount(LedgerAccount {
            id: node_id(AccountLevel::LedgerAccount, code),
            code: code.to_string(),
            name: name.to_string(),
            control_account_id: node_id(AccountLevel::ControlAccount, parent_code(code)),
            balance: BigDecimal::from(*opening),
            can_post: true,
            currency: "INR".to_string(),
        }));
    }

    nodes
}

/// The standard GST slabs
pub fn tax_rates() -> Vec<TaxRate> {
    GstSlab::ALL.iter().map(GstSlab::tax_rate).collect()
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            id: "P001".to_string(),
            code: "P001".to_string(),
            name: "Steel Fasteners".to_string(),
            unit: "pcs".to_string(),
            purchase_price: BigDecimal::from(45),
            sale_price: BigDecimal::from(60),
            hsn_sac: "7318".to_string(),
            tax_rate_id: Some(GstSlab::Higher.tax_rate().id),
        },
        Product {
            id: "P002".to_string(),
            code: "P002".to_string(),
            name: "Notebook".to_string(),
            unit: "pcs".to_string(),
            purchase_price: BigDecimal::from(10),
            sale_price: BigDecimal::from(15),
            hsn_sac: "4820".to_string(),
            tax_rate_id: Some(GstSlab::Standard.tax_rate().id),
        },
    ]
}

/// Purchase note PN001: 10 × 45 at 18% and 20 × 10 at 12%
///
/// Prices to sub total 650, tax 105 and grand total 755.
pub fn purchase_note_pn001() -> DocumentBuilder {
    let mut builder = DocumentBuilder::new(DocumentKind::PurchaseNote)
        .note_number("PN001".to_string())
        .counterparty("Sharma Traders".to_string())
        .item(ItemDraft::new(
            "P001".to_string(),
            BigDecimal::from(10),
            BigDecimal::from(45),
            GstSlab::Higher.tax_rate().id,
        ))
        .item(ItemDraft::new(
            "P002".to_string(),
            BigDecimal::from(20),
            BigDecimal::from(10),
            GstSlab::Standard.tax_rate().id,
        ));
    builder.date = NaiveDate::from_ymd_opt(2024, 4, 5);
    builder
}

/// Write the chart, tax rates and products into empty storage
pub async fn seed_storage<S: BookStorage>(storage: &mut S) -> BookResult<()> {
    if !storage.list_nodes(None).await?.is_empty() {
        return Err(BookError::validation(
            "Storage already holds a chart of accounts",
        ));
    }

    for node in chart_of_accounts() {
        storage.save_node(&node).await?;
    }
    for rate in tax_rates() {
        storage.save_tax_rate(&rate).await?;
    }
    for product in products() {
        storage.save_product(&product).await?;
    }

    tracing::info!(
        nodes = CONTROL_GROUPS.len()
            + SUB_CONTROL_GROUPS.len()
            + CONTROL_ACCOUNTS.len()
            + LEDGER_ACCOUNTS.len(),
        "seeded standard chart of accounts"
    );
    Ok(())
}
