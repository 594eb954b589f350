use crate::model::{Product, ProductCreate, ProductId, ProductSnapshot, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Catalog page selection. Defaults to the first 100 products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub skip: usize,
    pub limit: usize,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: usize = 100;
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Client for the catalog side of the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%id, "Product created");
        Ok(id)
    }

    /// Fetches the catalog view of a product.
    ///
    /// # Errors
    /// `ProductError::NotFound` if the product does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, ProductError> {
        self.get(id)
            .await?
            .map(|product| product.snapshot())
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Lists products in id order.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Vec<ProductSnapshot>, ProductError> {
        let products = self.list(page.skip, page.limit).await?;
        Ok(products.iter().map(Product::snapshot).collect())
    }

    /// Number of products in the catalog.
    #[instrument(skip(self))]
    pub async fn count_products(&self) -> Result<usize, ProductError> {
        self.inner.count().await.map_err(Self::map_error)
    }

    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductSnapshot, ProductError> {
        debug!(?update, "Sending request");
        let product = self.inner.update(id, update).await.map_err(Self::map_error)?;
        Ok(product.snapshot())
    }

    /// Deletes a product.
    ///
    /// # Errors
    /// `ProductError::ReservationsOutstanding` while any cart holds units of it.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.delete(id).await?;
        info!(%id, "Product deleted");
        Ok(())
    }

    /// Units of the product still available to reserve.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(stock) => Ok(stock),
            other => Err(ProductError::ActorCommunicationError(format!(
                "unexpected result for CheckStock: {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from(e)
    }
}
