use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::store::Record;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A catalog entry as persisted. `image` is a reference path under
/// `/uploads`, or `null` when the product has no image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields a catalog update may supply. `None` preserves the stored value.
#[derive(Clone, Debug, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl Product {
    pub fn new(
        name: String,
        price: f64,
        description: Option<String>,
        category: Option<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            price,
            description: description.unwrap_or_default(),
            category: category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image,
            created_at: Utc::now(),
        }
    }

    /// Merges supplied fields over the record. `id`, `created_at` and
    /// `image` never change here.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }
}

impl Record for Product {
    fn id(&self) -> Uuid {
        self.id
    }
}
