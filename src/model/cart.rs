//! Cart lines and the read-side views built from them.
//!
//! A [`CartLine`] records units of one product held by one cart session. It stores only the
//! `product_id`; the product data shown alongside it is a [`ProductSnapshot`] taken when the
//! line is read.

use crate::model::{ProductId, ProductSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque, caller-supplied key that groups cart lines. Not an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSessionId(pub String);

impl From<&str> for CartSessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CartSessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for CartSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type-safe identifier for cart lines. Assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CartLineId(pub u64);

impl Display for CartLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line_{}", self.0)
    }
}

/// Units of one product held by one cart session. `quantity` is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: CartLineId,
    pub cart_session_id: CartSessionId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A cart line joined with the product as it was when the line was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineView {
    pub line: CartLine,
    pub product: ProductSnapshot,
}

/// Acknowledges that a cart line was removed and its units returned to stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineRemoved {
    pub line_id: CartLineId,
    pub cart_session_id: CartSessionId,
    pub product_id: ProductId,
    pub released: u32,
    pub stock_quantity: u32,
}

/// Outcome of setting a cart line's quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartMutation {
    Updated(CartLineView),
    Removed(CartLineRemoved),
}
