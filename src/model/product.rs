//! Catalog products and the cart holds placed against them.
//!
//! # Actor Framework
//! [`Product`] implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])
//! - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
//!
//! # Stock accounting
//! `stock_quantity` is the count still available to reserve. Every unit sitting in a cart is
//! recorded as a [`CartLine`] in `holds`, so `stock_quantity + reserved_quantity()` is the
//! provisioned total and only changes through catalog updates.

use crate::model::{CartLine, CartLineView, CartSessionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A catalog product. `holds` is keyed by session, so a session has at most one line per product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub(crate) holds: BTreeMap<CartSessionId, CartLine>,
}

impl Product {
    /// Creates a product with no optional attributes and no cart holds.
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock_quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            stock_quantity,
            image_url: None,
            category: None,
            holds: BTreeMap::new(),
        }
    }

    /// The catalog view of this product, without cart holds.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock_quantity: self.stock_quantity,
            image_url: self.image_url.clone(),
            category: self.category.clone(),
        }
    }

    /// The cart line a session holds against this product, if any.
    pub fn hold_for(&self, session: &CartSessionId) -> Option<&CartLine> {
        self.holds.get(session)
    }

    /// The session's cart line joined with the current catalog view of this product.
    pub fn view_for(&self, session: &CartSessionId) -> Option<CartLineView> {
        self.hold_for(session).map(|line| CartLineView {
            line: line.clone(),
            product: self.snapshot(),
        })
    }

    /// All cart lines currently holding units of this product.
    pub fn holds(&self) -> impl Iterator<Item = &CartLine> {
        self.holds.values()
    }

    /// Units currently held by carts.
    pub fn reserved_quantity(&self) -> u64 {
        self.holds.values().map(|line| u64::from(line.quantity)).sum()
    }

    /// Available plus reserved units.
    pub fn provisioned_quantity(&self) -> u64 {
        u64::from(self.stock_quantity) + self.reserved_quantity()
    }
}

/// Read-side copy of a product's catalog attributes, joined onto cart lines and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

impl ProductCreate {
    /// A payload with only the required attributes set.
    pub fn new(name: impl Into<String>, price: Decimal, stock_quantity: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            stock_quantity,
            image_url: None,
            category: None,
        }
    }
}

/// Partial update of a product; `None` leaves the attribute as it is.
///
/// Setting `stock_quantity` re-provisions the available count. Units already held by carts are
/// not affected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<u32>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}
