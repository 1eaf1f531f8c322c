//! Bookkeeping walkthrough: seed the books, record a purchase, pay the
//! supplier, make a sale and print the trial balance
//!
//! Built as the `bookkeeping_demo` example target. The source sits in
//! `demos/` instead of `examples/`; see `[[example]]` in Cargo.toml.
//!
//! ```sh
//! cargo run --example bookkeeping_demo
//! ```

use bigdecimal::BigDecimal;
use bookkeeping_core::utils::{seed, MemoryStorage};
use bookkeeping_core::{
    Books, BooksConfig, DocumentBuilder, DocumentKind, DocumentPostingAccounts, ItemDraft,
    PaymentMode, PaymentVoucher,
};
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bookkeeping_core=debug")),
        )
        .init();

    println!("🧾 Bookkeeping Core - Demo\n");

    let config = match std::env::args().nth(1) {
        Some(path) => BooksConfig::from_file(path)?,
        None => BooksConfig::default(),
    };
    let mut books = Books::seeded(MemoryStorage::new(), config).await?;

    // 1. Chart of accounts
    println!("📊 Chart of Accounts");
    for root in books.list_roots().await? {
        println!("  {} {}", root.code(), root.name());
        for child in books.list_children(root.id()).await? {
            println!("    {} {}", child.code(), child.name());
        }
    }

    // 2. Purchase note PN001
    println!("\n📦 Purchase Note PN001");
    let note = books.save_document(&seed::purchase_note_pn001()).await?;
    println!("  Sub total: ₹{}", note.sub_total);
    println!("  CGST:      ₹{}", note.tax_breakdown.cgst);
    println!("  SGST:      ₹{}", note.tax_breakdown.sgst);
    println!("  Total:     ₹{}", note.grand_total);

    let purchase_accounts = DocumentPostingAccounts {
        party_account_id: seed::TRADE_CREDITORS.to_string(),
        trade_account_id: seed::PURCHASE_ACCOUNT.to_string(),
        tax_account_id: seed::INPUT_GST.to_string(),
    };
    books
        .post_document(DocumentKind::PurchaseNote, "PN001", &purchase_accounts)
        .await?;
    println!("  ✓ Posted to purchases, input GST and trade creditors");

    // 3. Pay the supplier
    let payment = PaymentVoucher {
        voucher_number: "PV001".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 4, 12).ok_or("invalid date")?,
        account_id: seed::TRADE_CREDITORS.to_string(),
        amount: note.grand_total.clone(),
        mode: PaymentMode::Bank,
        narration: "Paid Sharma Traders against PN001".to_string(),
    };
    books.record_payment(payment, seed::BANK_ACCOUNT).await?;
    println!("  ✓ Paid ₹{} from the bank", note.grand_total);

    // 4. Inter-state sale
    println!("\n🚚 Sale Note SN001");
    let sale = DocumentBuilder::new(DocumentKind::SaleNote)
        .note_number("SN001".to_string())
        .date(NaiveDate::from_ymd_opt(2024, 4, 18).ok_or("invalid date")?)
        .counterparty("Gupta Stores".to_string())
        .supply(bookkeeping_core::SupplyType::InterState)
        .item(ItemDraft::new(
            "P001".to_string(),
            BigDecimal::from(8),
            BigDecimal::from(60),
            "gst-18".to_string(),
        ));
    let sale = books.save_document(&sale).await?;
    println!("  IGST:  ₹{}", sale.tax_breakdown.igst);
    println!("  Total: ₹{}", sale.grand_total);

    let sale_accounts = DocumentPostingAccounts {
        party_account_id: seed::TRADE_DEBTORS.to_string(),
        trade_account_id: seed::SALES_ACCOUNT.to_string(),
        tax_account_id: seed::OUTPUT_GST.to_string(),
    };
    books
        .post_document(DocumentKind::SaleNote, "SN001", &sale_accounts)
        .await?;

    // 5. Trial balance
    println!("\n📈 Trial Balance");
    let trial_balance = books.trial_balance().await?;
    for row in &trial_balance.rows {
        let debit = row.debit_balance.as_ref().map(ToString::to_string);
        let credit = row.credit_balance.as_ref().map(ToString::to_string);
        println!(
            "  {:<12} {:<20} {:>12} {:>12}",
            row.code,
            row.name,
            debit.unwrap_or_default(),
            credit.unwrap_or_default()
        );
    }
    println!(
        "  {:<33} {:>12} {:>12}",
        "Total", trial_balance.total_debits, trial_balance.total_credits
    );
    println!(
        "\n{} Books are {}",
        if trial_balance.is_balanced { "✅" } else { "❌" },
        if trial_balance.is_balanced {
            "balanced"
        } else {
            "out of balance"
        }
    );

    Ok(())
}
