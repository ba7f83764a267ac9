use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{Entity, ProductId};

use crate::{category::Category, price::Price, size::Size, slug::Slug};

/// A sellable product as the storefront sees it.
///
/// The owning category and the linked sizes are carried along so a page can
/// be rendered without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub category: Category,
    pub sizes: Vec<Size>,
    pub slug: Slug,
}

impl Product {
    pub fn new(name: impl Into<String>, slug: Slug, category: Category, price: Price) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            description: String::new(),
            price,
            color: String::new(),
            created_at: Utc::now(),
            category,
            sizes: Vec::new(),
            slug,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = Size>) -> Self {
        self.sizes = sizes.into_iter().collect();
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Case-insensitive substring match on name or description.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// Case-insensitive color equality.
    pub fn has_color(&self, color: &str) -> bool {
        self.color.to_lowercase() == color.to_lowercase()
    }

    /// Exact match against the name of a linked size.
    pub fn has_size(&self, size_name: &str) -> bool {
        self.sizes.iter().any(|s| s.name == size_name)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoes() -> Category {
        Category::new("Shoes", Slug::parse("shoes").unwrap())
    }

    fn runner() -> Product {
        Product::new(
            "Trail Runner",
            Slug::parse("trail-runner").unwrap(),
            shoes(),
            Price::from_cents(8900),
        )
        .with_description("Grippy sole for MUDDY paths")
        .with_color("Red")
        .with_sizes([Size::new("42"), Size::new("43")])
    }

    #[test]
    fn mentions_checks_name_and_description_ignoring_case() {
        let p = runner();
        assert!(p.mentions("trail"));
        assert!(p.mentions("muddy"));
        assert!(p.mentions("SOLE"));
        assert!(!p.mentions("sandal"));
    }

    #[test]
    fn color_match_ignores_case_but_is_exact() {
        let p = runner();
        assert!(p.has_color("red"));
        assert!(p.has_color("RED"));
        assert!(!p.has_color("re"));
        assert!(!p.has_color("dark red"));
    }

    #[test]
    fn size_match_is_exact() {
        let p = runner();
        assert!(p.has_size("42"));
        assert!(!p.has_size("4"));
        assert!(!p.has_size("44"));
    }
}
