//! Product Repository

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Product, ProductExpanded};

const TABLE: &str = "product";

/// Fields the filter endpoint may sort on. Anything else falls back to
/// price (the query string is interpolated, so this list is the guard).
const SORTABLE_FIELDS: &[&str] = &["price", "name", "stock_quantity", "created_at"];

/// Conjunctive filter for the product listing endpoints
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub size: Option<String>,
    pub color: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl ProductFilter {
    fn sort_field(&self) -> &str {
        match self.sort_by.as_deref() {
            Some(field) if SORTABLE_FIELDS.contains(&field) => field,
            _ => "price",
        }
    }

    fn sort_direction(&self) -> &str {
        match self.order.as_deref() {
            Some("desc") => "DESC",
            _ => "ASC",
        }
    }
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all non-deleted products with category fetched
    pub async fn find_all_expanded(&self) -> RepoResult<Vec<ProductExpanded>> {
        let products: Vec<ProductExpanded> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_deleted = false ORDER BY created_at FETCH category")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let product: Option<Product> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Find a non-deleted product matching the dedup tuple
    /// (name, gender, size, color)
    pub async fn find_duplicate(
        &self,
        name: &str,
        gender: Option<&str>,
        size: Option<&str>,
        color: Option<&str>,
    ) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE name = $name AND gender = $gender \
                 AND size = $size AND color = $color AND is_deleted = false LIMIT 1",
            )
            .bind(("name", name.to_string()))
            .bind(("gender", gender.map(|s| s.to_string())))
            .bind(("size", size.map(|s| s.to_string())))
            .bind(("color", color.map(|s| s.to_string())))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Count non-deleted products in a category
    pub async fn count_in_category(&self, category: &Thing) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM product WHERE category = $cat AND is_deleted = false GROUP ALL")
            .bind(("cat", category.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Create a new product
    pub async fn create(&self, product: Product) -> RepoResult<Product> {
        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Replace a product record wholesale
    pub async fn replace(&self, id: &str, mut product: Product) -> RepoResult<Product> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        product.id = None;
        let updated: Option<Product> = self
            .base
            .db()
            .update((TABLE, pure_id))
            .content(product)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let result: Option<Product> = self.base.db().delete((TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    /// Filter products. Conjunctive over present fields; inclusive price
    /// bounds on both ends.
    pub async fn filter(&self, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        let mut conditions: Vec<&str> = vec!["is_deleted = false"];
        if filter.size.is_some() {
            conditions.push("size = $size");
        }
        if filter.color.is_some() {
            conditions.push("color = $color");
        }
        if filter.min_price.is_some() {
            conditions.push("price >= $min_price");
        }
        if filter.max_price.is_some() {
            conditions.push("price <= $max_price");
        }

        let query_str = format!(
            "SELECT * FROM product WHERE {} ORDER BY {} {}",
            conditions.join(" AND "),
            filter.sort_field(),
            filter.sort_direction(),
        );

        let mut query = self.base.db().query(&query_str);
        if let Some(size) = &filter.size {
            query = query.bind(("size", size.clone()));
        }
        if let Some(color) = &filter.color {
            query = query.bind(("color", color.clone()));
        }
        if let Some(min_price) = filter.min_price {
            query = query.bind(("min_price", min_price));
        }
        if let Some(max_price) = filter.max_price {
            query = query.bind(("max_price", max_price));
        }

        let products: Vec<Product> = query.await?.take(0)?;
        Ok(products)
    }

    /// Find products in a category (with the category record fetched),
    /// optionally narrowed by gender and an inclusive price range.
    pub async fn find_by_category_expanded(
        &self,
        category: Option<&Thing>,
        gender: Option<&str>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> RepoResult<Vec<ProductExpanded>> {
        let mut conditions: Vec<&str> = vec!["is_deleted = false"];
        if category.is_some() {
            conditions.push("category = $cat");
        }
        if gender.is_some() {
            conditions.push("gender = $gender");
        }
        if min_price.is_some() {
            conditions.push("price >= $min_price");
        }
        if max_price.is_some() {
            conditions.push("price <= $max_price");
        }

        let query_str = format!(
            "SELECT * FROM product WHERE {} FETCH category",
            conditions.join(" AND "),
        );

        let mut query = self.base.db().query(&query_str);
        if let Some(cat) = category {
            query = query.bind(("cat", cat.clone()));
        }
        if let Some(gender) = gender {
            query = query.bind(("gender", gender.to_string()));
        }
        if let Some(min_price) = min_price {
            query = query.bind(("min_price", min_price));
        }
        if let Some(max_price) = max_price {
            query = query.bind(("max_price", max_price));
        }

        let products: Vec<ProductExpanded> = query.await?.take(0)?;
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_whitelist_falls_back_to_price() {
        let filter = ProductFilter {
            sort_by: Some("password; DROP TABLE product".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.sort_field(), "price");

        let filter = ProductFilter {
            sort_by: Some("name".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.sort_field(), "name");
    }

    #[test]
    fn sort_direction_defaults_to_ascending() {
        assert_eq!(ProductFilter::default().sort_direction(), "ASC");
        let filter = ProductFilter {
            order: Some("desc".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.sort_direction(), "DESC");
    }
}
