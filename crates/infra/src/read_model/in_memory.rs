use std::sync::{RwLock, RwLockReadGuard};

use storefront_catalog::{Category, Product, Size, Slug};
use storefront_core::Entity;

use super::catalog_store::{CatalogStore, StoreError};
use super::query::ProductQuery;

#[derive(Debug, Default)]
struct CatalogData {
    categories: Vec<Category>,
    sizes: Vec<Size>,
    products: Vec<Product>,
}

/// In-memory catalog for tests/dev.
///
/// Writes replace records with the same id, so seeding twice is harmless.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<CatalogData>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_category(&self, category: Category) {
        if let Ok(mut data) = self.inner.write() {
            replace(&mut data.categories, category);
        }
    }

    pub fn upsert_size(&self, size: Size) {
        if let Ok(mut data) = self.inner.write() {
            replace(&mut data.sizes, size);
        }
    }

    pub fn upsert_product(&self, product: Product) {
        if let Ok(mut data) = self.inner.write() {
            replace(&mut data.products, product);
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogData>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory catalog lock poisoned".to_string()))
    }
}

fn replace<T: Entity>(rows: &mut Vec<T>, record: T) {
    rows.retain(|r| r.id() != record.id());
    rows.push(record);
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut out = self.read()?.categories.clone();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn sizes(&self) -> Result<Vec<Size>, StoreError> {
        let mut out = self.read()?.sizes.clone();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError> {
        Ok(self.read()?.categories.iter().find(|c| &c.slug == slug).cloned())
    }

    async fn product_by_slug(&self, slug: &Slug) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.products.iter().find(|p| &p.slug == slug).cloned())
    }

    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        Ok(query.apply(&self.read()?.products))
    }
}
