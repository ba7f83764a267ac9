//! Read-only catalog storage: the store seam, its query language and backends.

pub mod catalog_store;
pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod query;

pub use catalog_store::{CatalogStore, StoreError};
pub use in_memory::InMemoryCatalogStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresCatalogStore;
pub use query::{ProductFilter, ProductOrdering, ProductQuery};
