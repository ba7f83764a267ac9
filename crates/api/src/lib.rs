//! HTTP storefront: index, catalog and product pages over a catalog store.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
