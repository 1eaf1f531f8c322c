//! Trading documents: products, line items and note totals

pub mod item;
pub mod note;
pub mod product;

pub use item::*;
pub use note::*;
pub use product::*;
