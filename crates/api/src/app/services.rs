use std::sync::Arc;

use axum::response::{IntoResponse, Response};

use storefront_infra::{CatalogStore, InMemoryCatalogStore};

use crate::app::dto::PageContext;
use crate::app::errors::ViewError;
use crate::app::render::{HtmlRenderer, JsonRenderer, Renderer};
use crate::app::selector::Template;
use crate::config::{RendererKind, StorefrontConfig};

/// Collaborators shared by every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn CatalogStore>,
    renderer: Arc<dyn Renderer>,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>, renderer: Arc<dyn Renderer>) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }

    pub fn render(&self, template: Template, context: &PageContext) -> Result<Response, ViewError> {
        tracing::debug!(template = template.name(), "rendering");
        Ok(self.renderer.render(template, context)?.into_response())
    }
}

fn renderer_for(kind: RendererKind) -> Arc<dyn Renderer> {
    match kind {
        RendererKind::Html => Arc::new(HtmlRenderer),
        RendererKind::Json => Arc::new(JsonRenderer),
    }
}

fn build_in_memory_store(config: &StorefrontConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    let store = InMemoryCatalogStore::new();
    if config.seed_demo {
        storefront_infra::seed::seed_demo(&store)?;
    }
    Ok(Arc::new(store))
}

#[cfg(feature = "postgres")]
async fn build_persistent_store(config: &StorefrontConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set when USE_PERSISTENT_STORES=true"))?;
    let store = storefront_infra::PostgresCatalogStore::connect(url).await?;
    tracing::info!("using postgres catalog store");
    Ok(Arc::new(store))
}

pub async fn build_services(config: &StorefrontConfig) -> anyhow::Result<AppServices> {
    let store = if config.use_persistent_stores {
        #[cfg(feature = "postgres")]
        {
            build_persistent_store(config).await?
        }
        #[cfg(not(feature = "postgres"))]
        {
            tracing::warn!("USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory");
            build_in_memory_store(config)?
        }
    } else {
        build_in_memory_store(config)?
    };

    Ok(AppServices::new(store, renderer_for(config.renderer)))
}
