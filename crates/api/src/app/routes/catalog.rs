use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    response::Response,
};

use storefront_catalog::{Category, Slug};
use storefront_infra::{CatalogStore, ProductQuery};

use crate::app::dto::{CatalogContext, CatalogParams, PageContext};
use crate::app::errors::ViewError;
use crate::app::filters;
use crate::app::selector::{self, ContextPolicy, DisplayFlags, ViewKind};
use crate::app::services::AppServices;
use crate::context::RequestOrigin;

pub async fn catalog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(origin): Extension<RequestOrigin>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ViewError> {
    render_catalog(&services, origin, None, &CatalogParams::from_query(&query)).await
}

pub async fn catalog_in_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(origin): Extension<RequestOrigin>,
    Path(category_slug): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ViewError> {
    render_catalog(
        &services,
        origin,
        Some(&category_slug),
        &CatalogParams::from_query(&query),
    )
    .await
}

/// Malformed slugs cannot name a category, so they are plain not-found.
async fn resolve_category(store: &dyn CatalogStore, raw: &str) -> Result<Category, ViewError> {
    let slug = Slug::parse(raw).map_err(|_| ViewError::NotFound("category"))?;
    store
        .category_by_slug(&slug)
        .await?
        .ok_or(ViewError::NotFound("category"))
}

async fn render_catalog(
    services: &AppServices,
    origin: RequestOrigin,
    category_slug: Option<&str>,
    params: &CatalogParams,
) -> Result<Response, ViewError> {
    let store = services.store();

    let category = match category_slug {
        Some(raw) => Some(resolve_category(store, raw).await?),
        None => None,
    };
    let flags = DisplayFlags::from_params(params);
    let selection = selector::select(origin, ViewKind::Catalog, flags);
    tracing::debug!(
        category = category_slug,
        template = selection.template.name(),
        "catalog request"
    );

    let context = match selection.context {
        ContextPolicy::Discard => PageContext::empty(),
        ContextPolicy::Keep => {
            let composition = filters::compose(ProductQuery::all(), category.as_ref(), params)?;
            PageContext::Catalog(Box::new(CatalogContext {
                categories: store.categories().await?,
                products: store.products(&composition.products).await?,
                current_category: category.map(|c| c.slug),
                filter_params: composition.filter_params,
                sizes: store.sizes().await?,
                search_query: composition.search_query,
                show_search: flags.show_search,
                reset_search: flags.reset_search && !flags.show_search,
            }))
        }
    };

    services.render(selection.template, &context)
}
