//! Postgres-backed catalog store.
//!
//! Schema lives in `migrations/` and is applied by [`PostgresCatalogStore::connect`]
//! (or [`PostgresCatalogStore::migrate`] for a caller-owned pool). Product queries are compiled
//! into a single parameterised `SELECT`; sizes are fetched in one follow-up
//! query for the returned page of products.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use storefront_catalog::{Category, Price, Product, Size, Slug};
use storefront_core::{CategoryId, ProductId, SizeId};

use super::catalog_store::{CatalogStore, StoreError};
use super::query::{ProductFilter, ProductOrdering, ProductQuery};

const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id, p.name, p.description, p.price_cents, p.color, p.created_at, p.slug,
        c.id AS category_id, c.name AS category_name, c.slug AS category_slug
    FROM products p
    JOIN categories c ON c.id = p.category_id
    WHERE TRUE"#;

/// Embedded catalog schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Bring the schema up to date. Already-applied migrations are skipped.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(self.pool.as_ref()).await.map_err(|e| {
            tracing::error!(error = %e, "catalog migration failed");
            StoreError::Unavailable(format!("migrate: {e}"))
        })
    }

    async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        push_filters(&mut qb, query.filters());
        push_ordering(&mut qb, query.ordering());
        if let Some(limit) = query.max_results() {
            qb.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows = qb
            .build()
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("products", e))?;

        let mut products = rows.iter().map(product_from_row).collect::<Result<Vec<_>, _>>()?;
        self.attach_sizes(&mut products).await?;
        Ok(products)
    }

    async fn attach_sizes(&self, products: &mut [Product]) -> Result<(), StoreError> {
        if products.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = products.iter().map(|p| *p.id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT ps.product_id, s.id, s.name
            FROM product_sizes ps
            JOIN sizes s ON s.id = ps.size_id
            WHERE ps.product_id = ANY($1)
            ORDER BY s.name
            "#,
        )
        .bind(ids)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("product_sizes", e))?;

        let mut by_product: HashMap<Uuid, Vec<Size>> = HashMap::new();
        for row in rows {
            let product_id: Uuid = get(&row, "product_id")?;
            by_product.entry(product_id).or_default().push(Size {
                id: SizeId::from_uuid(get(&row, "id")?),
                name: get(&row, "name")?,
            });
        }
        for product in products.iter_mut() {
            product.sizes = by_product.remove(product.id.as_uuid()).unwrap_or_default();
        }
        Ok(())
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &[ProductFilter]) {
    for filter in filters {
        match filter {
            ProductFilter::Category(id) => {
                qb.push(" AND p.category_id = ").push_bind(*id.as_uuid());
            }
            ProductFilter::Search(text) => {
                let pattern = format!("%{}%", escape_like(text));
                qb.push(" AND (p.name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR p.description ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
            ProductFilter::ColorIs(color) => {
                qb.push(" AND lower(p.color) = lower(").push_bind(color.clone()).push(")");
            }
            ProductFilter::MinPrice(min) => {
                qb.push(" AND p.price_cents >= ").push_bind(cents_to_i64(*min));
            }
            ProductFilter::MaxPrice(max) => {
                qb.push(" AND p.price_cents <= ").push_bind(cents_to_i64(*max));
            }
            ProductFilter::HasSize(name) => {
                qb.push(
                    " AND EXISTS (SELECT 1 FROM product_sizes ps JOIN sizes s ON s.id = ps.size_id \
                     WHERE ps.product_id = p.id AND s.name = ",
                )
                .push_bind(name.clone())
                .push(")");
            }
            ProductFilter::NotProduct(id) => {
                qb.push(" AND p.id <> ").push_bind(*id.as_uuid());
            }
        }
    }
}

fn push_ordering(qb: &mut QueryBuilder<'_, Postgres>, ordering: ProductOrdering) {
    match ordering {
        ProductOrdering::NewestFirst => qb.push(" ORDER BY p.created_at DESC, p.id DESC"),
        ProductOrdering::Name => qb.push(" ORDER BY p.name ASC, p.id ASC"),
    };
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// Amounts past i64::MAX cents clamp; the column cannot hold them anyway.
fn cents_to_i64(price: Price) -> i64 {
    i64::try_from(price.cents()).unwrap_or(i64::MAX)
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(column)
        .map_err(|e| StoreError::Corrupt(format!("column {column}: {e}")))
}

fn slug_from(raw: String) -> Result<Slug, StoreError> {
    Slug::parse(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn category_from_row(row: &PgRow, prefix: &str) -> Result<Category, StoreError> {
    let col = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}_{name}")
        }
    };
    Ok(Category {
        id: CategoryId::from_uuid(get(row, &col("id"))?),
        name: get(row, &col("name"))?,
        slug: slug_from(get(row, &col("slug"))?)?,
    })
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let cents: i64 = get(row, "price_cents")?;
    let cents = u64::try_from(cents)
        .map_err(|_| StoreError::Corrupt(format!("negative price_cents {cents}")))?;
    let created_at: DateTime<Utc> = get(row, "created_at")?;

    Ok(Product {
        id: ProductId::from_uuid(get(row, "id")?),
        name: get(row, "name")?,
        description: get(row, "description")?,
        price: Price::from_cents(cents),
        color: get(row, "color")?,
        created_at,
        category: category_from_row(row, "category")?,
        sizes: Vec::new(),
        slug: slug_from(get(row, "slug")?)?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    tracing::error!(operation, error = %err, "catalog query failed");
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Corrupt(format!("{operation}: {err}"))
        }
        other => StoreError::Unavailable(format!("{operation}: {other}")),
    }
}

#[async_trait::async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query("SELECT id, name, slug FROM categories ORDER BY name")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("categories", e))?;
        rows.iter().map(|r| category_from_row(r, "")).collect()
    }

    async fn sizes(&self) -> Result<Vec<Size>, StoreError> {
        let rows = sqlx::query("SELECT id, name FROM sizes ORDER BY name")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("sizes", e))?;
        rows.iter()
            .map(|r| {
                Ok(Size {
                    id: SizeId::from_uuid(get(r, "id")?),
                    name: get(r, "name")?,
                })
            })
            .collect()
    }

    async fn category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError> {
        let row = sqlx::query("SELECT id, name, slug FROM categories WHERE slug = $1")
            .bind(slug.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("category_by_slug", e))?;
        row.as_ref().map(|r| category_from_row(r, "")).transpose()
    }

    async fn product_by_slug(&self, slug: &Slug) -> Result<Option<Product>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        qb.push(" AND p.slug = ").push_bind(slug.as_str().to_string());
        let row = qb
            .build()
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("product_by_slug", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut products = vec![product_from_row(&row)?];
        self.attach_sizes(&mut products).await?;
        Ok(products.pop())
    }

    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        self.fetch_products(query).await
    }
}
