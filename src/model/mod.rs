//! Data structures managed by the product actor and the views handed back to callers.

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
