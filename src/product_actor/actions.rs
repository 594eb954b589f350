//! Custom actions for the Product actor.
//!
//! Cart operations are actions on the product they reserve from, so the stock check, the stock
//! write and the cart line write for one request are handled by a single message.

use crate::model::{CartLineRemoved, CartLineView, CartMutation, CartSessionId};

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the available stock without modifying it.
    CheckStock,
    /// Moves `quantity` units from stock into the session's cart line, creating the line if needed.
    ///
    /// # Errors
    /// Fails if `quantity` is zero or exceeds the available stock.
    Reserve {
        session: CartSessionId,
        quantity: u32,
    },
    /// Sets the session's cart line to exactly `quantity` units; zero removes the line.
    SetReserved {
        session: CartSessionId,
        quantity: u32,
    },
    /// Returns every unit held by the session's cart line to stock and removes the line.
    Release { session: CartSessionId },
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    CheckStock(u32),
    Reserve(CartLineView),
    SetReserved(CartMutation),
    Release(CartLineRemoved),
}
