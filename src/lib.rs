//! # Bookkeeping Core
//!
//! Double-entry bookkeeping over a four-level chart of accounts, with GST
//! priced trading documents and balanced journal vouchers.
//!
//! ## Features
//!
//! - **Chart of accounts**: control groups, sub-control groups, control accounts
//!   and ledger accounts with code conventions and guarded deletion
//! - **Documents**: purchase, sale and return notes with per-line tax and
//!   CGST/SGST/IGST breakdown
//! - **Vouchers**: journal, payment and receipt vouchers checked for balance
//!   before they touch ledger balances
//! - **Editing sessions**: line-level editing of drafts with collected
//!   validation errors
//! - **Storage abstraction**: database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use bookkeeping_core::utils::{seed, MemoryStorage};
//! use bookkeeping_core::{Books, BooksConfig};
//! use bigdecimal::BigDecimal;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), bookkeeping_core::BookError> {
//! let mut books = Books::seeded(MemoryStorage::new(), BooksConfig::default()).await?;
//!
//! let note = books.save_document(&seed::purchase_note_pn001()).await?;
//! assert_eq!(note.grand_total, BigDecimal::from(755));
//! # Ok(())
//! # }
//! ```

pub mod books;
pub mod chart;
pub mod config;
pub mod documents;
pub mod reports;
pub mod session;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;
pub mod vouchers;

// Re-export commonly used types
pub use books::Books;
pub use chart::*;
pub use config::BooksConfig;
pub use documents::*;
pub use reports::{TrialBalance, TrialBalanceRow};
pub use session::*;
pub use tax::*;
pub use traits::*;
pub use types::*;
pub use vouchers::*;
