use serde::{Deserialize, Serialize};

use storefront_core::{Entity, SizeId};

/// A size a product can be ordered in. Linked to products many-to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub id: SizeId,
    pub name: String,
}

impl Size {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SizeId::new(),
            name: name.into(),
        }
    }
}

impl Entity for Size {
    type Id = SizeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
