//! Infrastructure layer: catalog storage adapters and demo data.

pub mod read_model;
pub mod seed;

pub use read_model::{
    CatalogStore, InMemoryCatalogStore, ProductFilter, ProductOrdering, ProductQuery, StoreError,
};
#[cfg(feature = "postgres")]
pub use read_model::PostgresCatalogStore;
