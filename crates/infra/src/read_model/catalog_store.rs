use std::sync::Arc;

use thiserror::Error;

use storefront_catalog::{Category, Product, Size, Slug};

use super::query::ProductQuery;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or did not answer.
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be turned into a catalog value.
    #[error("corrupt catalog record: {0}")]
    Corrupt(String),
}

/// Read access to the persisted catalog.
///
/// Implementations must be safe to share across concurrent requests; the web
/// layer never writes through this trait.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// All categories, ordered by name.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    /// All sizes, ordered by name.
    async fn sizes(&self) -> Result<Vec<Size>, StoreError>;

    async fn category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError>;

    async fn product_by_slug(&self, slug: &Slug) -> Result<Option<Product>, StoreError>;

    /// Evaluate a product query.
    ///
    /// This is the only point where a [`ProductQuery`] touches data.
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError>;
}

#[async_trait::async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        (**self).categories().await
    }

    async fn sizes(&self) -> Result<Vec<Size>, StoreError> {
        (**self).sizes().await
    }

    async fn category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError> {
        (**self).category_by_slug(slug).await
    }

    async fn product_by_slug(&self, slug: &Slug) -> Result<Option<Product>, StoreError> {
        (**self).product_by_slug(slug).await
    }

    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        (**self).products(query).await
    }
}
