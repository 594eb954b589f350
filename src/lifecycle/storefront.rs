use crate::clients::{CartClient, ProductClient};
use crate::config::StorefrontConfig;
use crate::lifecycle::seed;
use crate::product_actor::{self, CartLineIds, ProductError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("failed to seed the starter catalog: {0}")]
    Seed(#[from] ProductError),

    #[error("actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStatus {
    Connected,
    Unreachable,
}

/// Result of a round trip through the product actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub catalog: CatalogStatus,
    /// Number of catalog products, when the actor answered.
    pub products: Option<usize>,
}

/// Owns the running product actor and the clients wired to it.
///
/// # Example
///
/// ```ignore
/// let storefront = Storefront::start(StorefrontConfig::default()).await?;
///
/// let session = CartSessionId::from("s-1");
/// let line = storefront.cart_client.add_to_cart(session, ProductId(1), 2).await?;
///
/// storefront.shutdown().await?;
/// ```
pub struct Storefront {
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Spawns the product actor with an empty catalog.
    pub fn new() -> Self {
        Self::with_config(&StorefrontConfig::default())
    }

    /// Spawns the product actor with the given mailbox and retry settings. Does not seed.
    pub fn with_config(config: &StorefrontConfig) -> Self {
        let (actor, generic_client) = product_actor::new(config.mailbox_capacity);
        let generic_client = generic_client.with_retry_policy(config.retry_policy());

        // Cart line ids are global across products, so one counter is shared by the actor.
        let handle = tokio::spawn(actor.run(CartLineIds::default()));

        Self {
            product_client: ProductClient::new(generic_client.clone()),
            cart_client: CartClient::new(generic_client),
            handles: vec![handle],
        }
    }

    /// Spawns the actor and seeds the starter catalog if configured and the catalog is empty.
    pub async fn start(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        info!(?config, "Starting storefront");
        let storefront = Self::with_config(&config);
        if config.seed_catalog {
            seed::seed_if_empty(&storefront.product_client).await?;
        }
        Ok(storefront)
    }

    /// Round-trips the product actor.
    pub async fn health(&self) -> HealthReport {
        match self.product_client.count_products().await {
            Ok(products) => {
                info!("Health check passed.");
                HealthReport {
                    status: HealthStatus::Healthy,
                    catalog: CatalogStatus::Connected,
                    products: Some(products),
                }
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                HealthReport {
                    status: HealthStatus::Unhealthy,
                    catalog: CatalogStatus::Unreachable,
                    products: None,
                }
            }
        }
    }

    /// Drops every client so the actor's mailbox closes, then waits for the actor task.
    pub async fn shutdown(self) -> Result<(), StorefrontError> {
        info!("Shutting down storefront...");
        drop(self.product_client);
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}
