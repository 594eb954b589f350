//! Cart operations over the Product actor.
//!
//! Each mutating operation is one action message to the product actor, so the stock counter and
//! the cart line change together or not at all. A caller that stops waiting (timeout, dropped
//! future) does not interrupt the actor: the operation either commits in full or was never
//! started.

use crate::model::{CartLineRemoved, CartLineView, CartMutation, CartSessionId, Product, ProductId};
use crate::product_actor::{CartError, ProductAction, ProductActionResult};
use actor_framework::ResourceClient;
use tracing::{debug, info, instrument};

/// Validates a signed quantity from a request layer.
///
/// # Errors
/// `CartError::InvalidArgument` for negative values or values above `u32::MAX`.
pub fn parse_quantity(raw: i64) -> Result<u32, CartError> {
    if raw < 0 {
        return Err(CartError::InvalidArgument(format!(
            "quantity must not be negative, got {raw}"
        )));
    }
    u32::try_from(raw)
        .map_err(|_| CartError::InvalidArgument(format!("quantity {raw} is out of range")))
}

/// Client for cart reservations held against products.
#[derive(Clone)]
pub struct CartClient {
    products: ResourceClient<Product>,
}

impl CartClient {
    pub fn new(products: ResourceClient<Product>) -> Self {
        Self { products }
    }

    /// Reserves `quantity` more units for the session, creating its line on first use.
    ///
    /// # Errors
    /// - `InvalidArgument` if `quantity` is zero
    /// - `NotFound` if the product does not exist
    /// - `InsufficientStock` if fewer than `quantity` units are available
    #[instrument(skip(self), fields(%session))]
    pub async fn add_to_cart(
        &self,
        session: CartSessionId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartLineView, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidArgument(
                "quantity must be greater than zero".into(),
            ));
        }
        debug!("Sending request");
        let action = ProductAction::Reserve { session, quantity };
        match self.products.perform_action(product_id, action).await? {
            ProductActionResult::Reserve(view) => {
                info!(line = %view.line.id, held = view.line.quantity, stock = view.product.stock_quantity, "Added to cart");
                Ok(view)
            }
            other => Err(unexpected("Reserve", &other)),
        }
    }

    /// Sets the session's line to exactly `quantity` units. Zero removes the line.
    ///
    /// # Errors
    /// - `NotFound` if the session has no line for the product
    /// - `InsufficientStock` if growing the line needs more units than are available
    #[instrument(skip(self), fields(%session))]
    pub async fn set_cart_quantity(
        &self,
        session: CartSessionId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartMutation, CartError> {
        debug!("Sending request");
        let action = ProductAction::SetReserved { session, quantity };
        match self.products.perform_action(product_id, action).await? {
            ProductActionResult::SetReserved(mutation) => Ok(mutation),
            other => Err(unexpected("SetReserved", &other)),
        }
    }

    /// Returns every unit on the session's line to stock and deletes the line.
    #[instrument(skip(self), fields(%session))]
    pub async fn remove_from_cart(
        &self,
        session: CartSessionId,
        product_id: ProductId,
    ) -> Result<CartLineRemoved, CartError> {
        debug!("Sending request");
        let action = ProductAction::Release { session };
        match self.products.perform_action(product_id, action).await? {
            ProductActionResult::Release(removed) => {
                info!(line = %removed.line_id, released = removed.released, "Removed from cart");
                Ok(removed)
            }
            other => Err(unexpected("Release", &other)),
        }
    }

    /// The session's lines in creation order, each joined with the current product. Empty if the
    /// session holds nothing.
    #[instrument(skip(self), fields(%session))]
    pub async fn get_cart(&self, session: &CartSessionId) -> Result<Vec<CartLineView>, CartError> {
        let owner = session.clone();
        let mut lines: Vec<CartLineView> = self
            .products
            .scan(move |products| {
                products
                    .filter_map(|product| product.view_for(&owner))
                    .collect::<Vec<_>>()
            })
            .await?;
        lines.sort_by_key(|view| view.line.id);
        debug!(lines = lines.len(), "Cart loaded");
        Ok(lines)
    }
}

fn unexpected(action: &str, result: &ProductActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected result for {action}: {result:?}"))
}
