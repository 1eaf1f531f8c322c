//! Four-level chart of accounts: control group, sub-control group,
//! control account and ledger account

pub mod hierarchy;
pub mod manager;
pub mod node;

pub use hierarchy::*;
pub use manager::*;
pub use node::*;
