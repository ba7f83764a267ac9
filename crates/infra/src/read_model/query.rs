//! Lazy product queries.
//!
//! A [`ProductQuery`] is a description of "which products, in which order",
//! built up one predicate at a time and only evaluated by a
//! [`CatalogStore`](super::CatalogStore). Predicates are plain data so the
//! same query runs against memory or SQL and can be inspected in tests.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use storefront_catalog::{Price, Product};
use storefront_core::{CategoryId, ProductId};

/// One narrowing predicate. Filters in a query are AND-ed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProductFilter {
    /// Product belongs to the category.
    Category(CategoryId),
    /// Name OR description contains the text, ignoring case.
    Search(String),
    /// Color equals the value, ignoring case.
    ColorIs(String),
    /// Price is at least the value.
    MinPrice(Price),
    /// Price is at most the value.
    MaxPrice(Price),
    /// One of the linked sizes has exactly this name.
    HasSize(String),
    /// Any product except this one.
    NotProduct(ProductId),
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::Category(id) => product.category.id == *id,
            ProductFilter::Search(text) => product.mentions(text),
            ProductFilter::ColorIs(color) => product.has_color(color),
            ProductFilter::MinPrice(min) => product.price >= *min,
            ProductFilter::MaxPrice(max) => product.price <= *max,
            ProductFilter::HasSize(name) => product.has_size(name),
            ProductFilter::NotProduct(id) => product.id != *id,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductOrdering {
    /// `created_at` descending; ties broken by id descending.
    #[default]
    NewestFirst,
    /// Name ascending; ties broken by id ascending.
    Name,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    filters: Vec<ProductFilter>,
    ordering: ProductOrdering,
    limit: Option<usize>,
}

impl ProductQuery {
    /// Every product, newest first.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: ProductFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn exclude(self, id: ProductId) -> Self {
        self.filter(ProductFilter::NotProduct(id))
    }

    pub fn order_by(mut self, ordering: ProductOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Cap the number of results. A later call replaces an earlier one.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[ProductFilter] {
        &self.filters
    }

    pub fn ordering(&self) -> ProductOrdering {
        self.ordering
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }

    /// True when every filter accepts the product. Ordering and limit are
    /// not considered.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Evaluate the query over an in-memory collection.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        let mut out: Vec<Product> = products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.ordering {
            ProductOrdering::NewestFirst => out.sort_by_key(|p| Reverse((p.created_at, p.id))),
            ProductOrdering::Name => out.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
        }

        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}
