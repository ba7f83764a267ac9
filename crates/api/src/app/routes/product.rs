use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::Response,
};

use storefront_catalog::{Product, Slug};
use storefront_infra::{ProductFilter, ProductOrdering, ProductQuery};

use crate::app::dto::{PageContext, ProductDetailContext};
use crate::app::errors::ViewError;
use crate::app::selector::{self, ContextPolicy, DisplayFlags, ViewKind};
use crate::app::services::AppServices;
use crate::context::RequestOrigin;

/// Upper bound on "you may also like" entries.
pub const RELATED_LIMIT: usize = 4;

/// Other products from the same category, newest first.
pub fn related_products_query(product: &Product) -> ProductQuery {
    ProductQuery::all()
        .filter(ProductFilter::Category(product.category.id))
        .exclude(product.id)
        .order_by(ProductOrdering::NewestFirst)
        .limit(RELATED_LIMIT)
}

pub async fn product_detail(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(origin): Extension<RequestOrigin>,
    Path(slug): Path<String>,
) -> Result<Response, ViewError> {
    let store = services.store();

    let slug = Slug::parse(&slug).map_err(|_| ViewError::NotFound("product"))?;
    let product = store
        .product_by_slug(&slug)
        .await?
        .ok_or(ViewError::NotFound("product"))?;

    let selection = selector::select(origin, ViewKind::ProductDetail, DisplayFlags::default());

    let context = match selection.context {
        ContextPolicy::Discard => PageContext::empty(),
        ContextPolicy::Keep => {
            let related_products = store.products(&related_products_query(&product)).await?;
            PageContext::ProductDetail(Box::new(ProductDetailContext {
                categories: store.categories().await?,
                current_category: product.category.slug.clone(),
                product,
                related_products,
            }))
        }
    };

    services.render(selection.template, &context)
}
