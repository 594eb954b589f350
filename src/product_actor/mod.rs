//! Product-specific resource logic, including the cart reservation actions.
//!
//! Every cart line is stored on the product it reserves from, so one product actor message
//! covers the stock check, the stock change and the line change of a cart operation.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{CartLineId, Product};
use actor_framework::{ResourceActor, ResourceClient};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out cart line ids in creation order. Injected into the product actor as its context.
#[derive(Debug, Clone, Default)]
pub struct CartLineIds(Arc<AtomicU64>);

impl CartLineIds {
    pub fn next(&self) -> CartLineId {
        CartLineId(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Creates a new Product actor and the generic client for its mailbox.
pub fn new(mailbox_capacity: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(mailbox_capacity)
}
