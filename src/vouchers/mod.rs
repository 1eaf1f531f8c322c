//! Journal, payment and receipt vouchers

pub mod cash;
pub mod journal;
pub mod posting;

pub use cash::*;
pub use journal::*;
pub use posting::*;
