use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, Entity};

use crate::slug::Slug;

/// A product category (`"Shoes"`, slug `shoes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
}

impl Category {
    pub fn new(name: impl Into<String>, slug: Slug) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            slug,
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
