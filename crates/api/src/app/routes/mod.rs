use axum::{routing::get, Router};

pub mod catalog;
pub mod index;
pub mod product;
pub mod system;

/// Router for the storefront pages. Every path is served with and without a
/// trailing slash.
pub fn router() -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/catalog", get(catalog::catalog))
        .route("/catalog/", get(catalog::catalog))
        .route("/catalog/:category_slug", get(catalog::catalog_in_category))
        .route("/catalog/:category_slug/", get(catalog::catalog_in_category))
        .route("/product/:slug", get(product::product_detail))
        .route("/product/:slug/", get(product::product_detail))
}
