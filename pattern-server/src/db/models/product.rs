//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::Category;
use crate::utils::{AppError, AppResult};

pub type ProductId = Thing;

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Generated display code (e.g. "PAT03CAT07"). Cosmetic label; the
    /// record id above is the true unique key.
    pub product_id: String,
    pub name: String,
    pub description: String,
    /// Non-negative price
    pub price: Decimal,
    /// Record link to category
    pub category: Thing,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Ordered image file paths, at most 5 per batch
    #[serde(default)]
    pub images: Vec<String>,
    /// Soft-delete flag (declared in the schema, not exercised by current
    /// operations — deletes are hard)
    #[serde(default)]
    pub is_deleted: bool,
    /// Update-audit flag, set on every update
    #[serde(default)]
    pub is_profile_updated: bool,
    /// Creation timestamp (unix millis)
    #[serde(default)]
    pub created_at: i64,
}

/// Product with its category record fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductExpanded {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_profile_updated: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// Validated creation data, parsed from the multipart form
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Category record id (with or without `category:` prefix)
    pub category: String,
    pub stock_quantity: u32,
    pub gender: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Partial update, parsed from the multipart form.
///
/// Merge policy: a field absent from the request keeps the stored value;
/// a field present in the request is validated and applied. There is no
/// falsy-coalescing — present-but-invalid values fail with a validation
/// error instead of silently keeping the old value.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub stock_quantity: Option<u32>,
    pub gender: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl ProductPatch {
    /// Validate the fields that are present
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(AppError::validation("name must not be empty"));
        }
        if let Some(description) = &self.description
            && description.trim().is_empty()
        {
            return Err(AppError::validation("description must not be empty"));
        }
        if let Some(price) = &self.price
            && price.is_sign_negative()
        {
            return Err(AppError::validation("price must not be negative"));
        }
        Ok(())
    }
}

impl Product {
    /// Apply a patch in place. Absent fields keep their stored value;
    /// the category link is resolved by the caller before this runs.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = &patch.price {
            self.price = *price;
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(gender) = &patch.gender {
            self.gender = Some(gender.clone());
        }
        if let Some(size) = &patch.size {
            self.size = Some(size.clone());
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        self.is_profile_updated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use surrealdb::sql::Thing;

    fn sample_product() -> Product {
        Product {
            id: None,
            product_id: "PAT01CAT01".to_string(),
            name: "Linen Shirt".to_string(),
            description: "Relaxed fit".to_string(),
            price: Decimal::new(2999, 2),
            category: Thing::from(("category", "shirts")),
            stock_quantity: 12,
            gender: Some("men".to_string()),
            size: Some("M".to_string()),
            color: Some("white".to_string()),
            images: vec!["Assets/Products/product-1-a.jpg".to_string()],
            is_deleted: false,
            is_profile_updated: false,
            created_at: 0,
        }
    }

    #[test]
    fn patch_with_only_price_keeps_other_fields() {
        let mut product = sample_product();
        let patch = ProductPatch {
            price: Some(Decimal::new(1999, 2)),
            ..Default::default()
        };

        product.apply_patch(&patch);

        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.name, "Linen Shirt");
        assert_eq!(product.description, "Relaxed fit");
        assert_eq!(product.images.len(), 1);
        assert!(product.is_profile_updated);
    }

    #[test]
    fn patch_rejects_empty_name() {
        let patch = ProductPatch {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn patch_rejects_negative_price() {
        let patch = ProductPatch {
            price: Some(Decimal::new(-100, 2)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn patch_accepts_zero_price_as_explicit_value() {
        // Present-but-zero overwrites; zero is a legal price, not "no change"
        let mut product = sample_product();
        let patch = ProductPatch {
            price: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
        product.apply_patch(&patch);
        assert_eq!(product.price, Decimal::ZERO);
    }
}
