use std::sync::Arc;

use axum::{extract::Extension, response::Response};

use crate::app::dto::{HomeContext, PageContext};
use crate::app::errors::ViewError;
use crate::app::selector::{self, ContextPolicy, DisplayFlags, ViewKind};
use crate::app::services::AppServices;
use crate::context::RequestOrigin;

/// All categories, no products.
pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(origin): Extension<RequestOrigin>,
) -> Result<Response, ViewError> {
    let selection = selector::select(origin, ViewKind::Index, DisplayFlags::default());

    let context = match selection.context {
        ContextPolicy::Discard => PageContext::empty(),
        ContextPolicy::Keep => PageContext::Home(HomeContext {
            categories: services.store().categories().await?,
            current_category: None,
        }),
    };

    services.render(selection.template, &context)
}
