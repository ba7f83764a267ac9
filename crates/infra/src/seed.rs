//! Demo catalog for local runs without a database.

use chrono::{Duration, Utc};

use storefront_catalog::{Category, Price, Product, Size, Slug};
use storefront_core::DomainResult;

use crate::read_model::InMemoryCatalogStore;

struct DemoProduct {
    name: &'static str,
    slug: &'static str,
    category: &'static str,
    price: &'static str,
    color: &'static str,
    sizes: &'static [&'static str],
    description: &'static str,
}

const CATEGORIES: &[(&str, &str)] = &[("Shoes", "shoes"), ("Hats", "hats"), ("Shirts", "shirts")];

const SIZES: &[&str] = &["S", "M", "L", "XL", "41", "42", "43", "44"];

const PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        name: "Trail Runner",
        slug: "trail-runner",
        category: "shoes",
        price: "89.00",
        color: "Red",
        sizes: &["42", "43", "44"],
        description: "Aggressive grip for muddy trails.",
    },
    DemoProduct {
        name: "City Sneaker",
        slug: "city-sneaker",
        category: "shoes",
        price: "64.50",
        color: "White",
        sizes: &["41", "42", "43"],
        description: "Clean leather sneaker for everyday wear.",
    },
    DemoProduct {
        name: "Canvas Low",
        slug: "canvas-low",
        category: "shoes",
        price: "39.99",
        color: "Red",
        sizes: &["41", "42"],
        description: "Lightweight canvas shoe.",
    },
    DemoProduct {
        name: "Wool Beanie",
        slug: "wool-beanie",
        category: "hats",
        price: "19.00",
        color: "Grey",
        sizes: &["M"],
        description: "Warm merino beanie.",
    },
    DemoProduct {
        name: "Sun Cap",
        slug: "sun-cap",
        category: "hats",
        price: "15.00",
        color: "Blue",
        sizes: &["S", "M", "L"],
        description: "Breathable cap with a long visor.",
    },
    DemoProduct {
        name: "Linen Shirt",
        slug: "linen-shirt",
        category: "shirts",
        price: "49.00",
        color: "White",
        sizes: &["S", "M", "L", "XL"],
        description: "Loose linen shirt for hot days.",
    },
];

/// Fill `store` with a small fixed catalog.
///
/// Products are spaced one day apart, first entry newest.
pub fn seed_demo(store: &InMemoryCatalogStore) -> DomainResult<()> {
    let mut categories = Vec::with_capacity(CATEGORIES.len());
    for (name, slug) in CATEGORIES {
        let category = Category::new(*name, Slug::parse(slug)?);
        store.upsert_category(category.clone());
        categories.push(category);
    }

    let sizes: Vec<Size> = SIZES.iter().map(|name| Size::new(*name)).collect();
    for size in &sizes {
        store.upsert_size(size.clone());
    }

    let now = Utc::now();
    for (age, demo) in PRODUCTS.iter().enumerate() {
        let category = categories
            .iter()
            .find(|c| c.slug.as_str() == demo.category)
            .cloned()
            .ok_or_else(storefront_core::DomainError::not_found)?;
        let product_sizes = sizes.iter().filter(|s| demo.sizes.contains(&s.name.as_str())).cloned();

        store.upsert_product(
            Product::new(demo.name, Slug::parse(demo.slug)?, category, Price::parse(demo.price)?)
                .with_description(demo.description)
                .with_color(demo.color)
                .with_sizes(product_sizes)
                .created_at(now - Duration::days(age as i64)),
        );
    }

    tracing::info!(
        categories = CATEGORIES.len(),
        products = PRODUCTS.len(),
        "seeded demo catalog"
    );
    Ok(())
}

/// A fresh in-memory store holding the demo catalog.
pub fn demo_catalog() -> DomainResult<InMemoryCatalogStore> {
    let store = InMemoryCatalogStore::new();
    seed_demo(&store)?;
    Ok(store)
}
