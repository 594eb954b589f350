//! Error types for the Product actor and the cart operations built on it.

use crate::model::{CartSessionId, ProductId};
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },

    /// The quantity is zero where a positive one is required, negative, or out of range.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The product attributes are invalid (e.g., empty name or negative price).
    #[error("Invalid product: {0}")]
    Validation(String),

    /// The session holds no cart line for this product.
    #[error("No cart line for session {session} on {product}")]
    CartLineNotFound {
        session: CartSessionId,
        product: ProductId,
    },

    /// The product cannot be deleted while carts hold units of it.
    #[error("{product} still has {reserved} units held by carts")]
    ReservationsOutstanding { product: ProductId, reserved: u64 },

    /// The product actor's mailbox stayed full for every retry.
    #[error("Product actor unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<ProductError>() {
            Ok(entity_error) => entity_error,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(FrameworkError::Busy { attempts }) => ProductError::Unavailable { attempts },
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Errors returned by cart operations.
///
/// Request layers are expected to map `NotFound` to 404, `InsufficientStock` and
/// `InvalidArgument` to 400 and `Unavailable` to 503.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The product or the cart line does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The reservation exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// A quantity was negative, or zero where a positive one is required.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The cart could not be reached within the retry budget; retry the whole request.
    #[error("Cart temporarily unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// Whether the caller may retry the same request later.
    pub fn is_transient(&self) -> bool {
        matches!(self, CartError::Unavailable { .. })
    }
}

impl From<ProductError> for CartError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => CartError::NotFound(id),
            ProductError::CartLineNotFound { .. } => CartError::NotFound(e.to_string()),
            ProductError::InsufficientStock {
                requested,
                available,
                ..
            } => CartError::InsufficientStock {
                requested,
                available,
            },
            ProductError::InvalidQuantity(_) | ProductError::Validation(_) => {
                CartError::InvalidArgument(e.to_string())
            }
            ProductError::Unavailable { attempts } => CartError::Unavailable { attempts },
            ProductError::ReservationsOutstanding { .. }
            | ProductError::ActorCommunicationError(_) => {
                CartError::ActorCommunicationError(e.to_string())
            }
        }
    }
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        ProductError::from(e).into()
    }
}
