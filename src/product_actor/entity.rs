//! ActorEntity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation that enables [`Product`] to be
//! managed by the generic [`ResourceActor`](actor_framework::ResourceActor).
//!
//! Cart reservations are actions on the product. The actor applies each action to a staged copy
//! and commits it only on `Ok`, so a reservation that fails half way leaves stock and holds as
//! they were.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use super::CartLineIds;
use crate::model::{
    CartLine, CartLineRemoved, CartLineView, CartMutation, CartSessionId, Product, ProductCreate,
    ProductId, ProductUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use tracing::debug;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = CartLineIds;
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_price(params.price)?;

        let mut product = Self::new(id, params.name, params.price, params.stock_quantity);
        product.description = params.description;
        product.image_url = params.image_url;
        product.category = params.category;
        Ok(product)
    }

    /// Applies a partial update. Only the provided fields change.
    ///
    /// A new `stock_quantity` replaces the available count; units held by carts stay held.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            validate_name(&name)?;
            self.name = name;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(stock) = update.stock_quantity {
            let reserved = self.reserved_quantity();
            if u64::from(stock) + reserved > u64::from(u32::MAX) {
                return Err(ProductError::Validation(format!(
                    "stock {stock} plus {reserved} held units exceeds {}",
                    u32::MAX
                )));
            }
            debug!(product = %self.id, from = self.stock_quantity, to = stock, "Re-provisioning stock");
            self.stock_quantity = stock;
        }
        if update.description.is_some() {
            self.description = update.description;
        }
        if update.image_url.is_some() {
            self.image_url = update.image_url;
        }
        if update.category.is_some() {
            self.category = update.category;
        }
        Ok(())
    }

    /// Refuses to delete a product that carts still hold units of.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        let reserved = self.reserved_quantity();
        if reserved > 0 {
            return Err(ProductError::ReservationsOutstanding {
                product: self.id,
                reserved,
            });
        }
        Ok(())
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the available stock
    /// - `Reserve`: Moves units from stock into the session's line
    /// - `SetReserved`: Moves units in either direction until the line holds the target
    /// - `Release`: Returns the whole line to stock
    async fn handle_action(
        &mut self,
        action: ProductAction,
        ids: &Self::Context,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock_quantity)),
            ProductAction::Reserve { session, quantity } => self
                .reserve(session, quantity, ids)
                .map(ProductActionResult::Reserve),
            ProductAction::SetReserved { session, quantity } => self
                .set_reserved(session, quantity)
                .map(ProductActionResult::SetReserved),
            ProductAction::Release { session } => {
                self.release(&session).map(ProductActionResult::Release)
            }
        }
    }
}

impl Product {
    fn reserve(
        &mut self,
        session: CartSessionId,
        quantity: u32,
        ids: &CartLineIds,
    ) -> Result<CartLineView, ProductError> {
        if quantity == 0 {
            return Err(ProductError::InvalidQuantity(0));
        }
        let held = self.hold_for(&session).map_or(0, |line| line.quantity);
        if held.checked_add(quantity).is_none() {
            return Err(ProductError::InvalidQuantity(i64::from(quantity)));
        }
        self.take_stock(quantity)?;

        let product_id = self.id;
        let line = self
            .holds
            .entry(session.clone())
            .or_insert_with(|| CartLine {
                id: ids.next(),
                cart_session_id: session,
                product_id,
                quantity: 0,
            });
        line.quantity += quantity;
        let line = line.clone();

        debug!(product = %self.id, line = %line.id, quantity = line.quantity, "Reserved");
        Ok(CartLineView {
            line,
            product: self.snapshot(),
        })
    }

    fn set_reserved(
        &mut self,
        session: CartSessionId,
        quantity: u32,
    ) -> Result<CartMutation, ProductError> {
        let held = self
            .hold_for(&session)
            .map(|line| line.quantity)
            .ok_or_else(|| missing_line(self.id, &session))?;

        match quantity.cmp(&held) {
            Ordering::Greater => self.take_stock(quantity - held)?,
            Ordering::Less => self.return_stock(held - quantity)?,
            Ordering::Equal => {}
        }

        if quantity == 0 {
            return self.drop_line(&session, held).map(CartMutation::Removed);
        }

        let line = self
            .holds
            .get_mut(&session)
            .ok_or_else(|| missing_line(self.id, &session))?;
        line.quantity = quantity;
        let line = line.clone();
        Ok(CartMutation::Updated(CartLineView {
            line,
            product: self.snapshot(),
        }))
    }

    fn release(&mut self, session: &CartSessionId) -> Result<CartLineRemoved, ProductError> {
        let held = self
            .hold_for(session)
            .map(|line| line.quantity)
            .ok_or_else(|| missing_line(self.id, session))?;
        self.return_stock(held)?;
        self.drop_line(session, held)
    }

    fn take_stock(&mut self, quantity: u32) -> Result<(), ProductError> {
        if quantity > self.stock_quantity {
            return Err(ProductError::InsufficientStock {
                product: self.id,
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        self.stock_quantity -= quantity;
        Ok(())
    }

    /// Puts held units back. The provisioned total is kept within `u32`, so this only fails if
    /// that invariant was broken.
    fn return_stock(&mut self, quantity: u32) -> Result<(), ProductError> {
        self.stock_quantity = self
            .stock_quantity
            .checked_add(quantity)
            .ok_or_else(|| {
                ProductError::Validation(format!(
                    "returning {quantity} units to {} overflows stock",
                    self.id
                ))
            })?;
        Ok(())
    }

    fn drop_line(
        &mut self,
        session: &CartSessionId,
        released: u32,
    ) -> Result<CartLineRemoved, ProductError> {
        let line = self
            .holds
            .remove(session)
            .ok_or_else(|| missing_line(self.id, session))?;
        debug!(product = %self.id, line = %line.id, released, "Released");
        Ok(CartLineRemoved {
            line_id: line.id,
            cart_session_id: line.cart_session_id,
            product_id: line.product_id,
            released,
            stock_quantity: self.stock_quantity,
        })
    }
}

fn missing_line(product: ProductId, session: &CartSessionId) -> ProductError {
    ProductError::CartLineNotFound {
        session: session.clone(),
        product,
    }
}

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::Validation("name must not be empty".into()));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price < Decimal::ZERO {
        return Err(ProductError::Validation(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}
