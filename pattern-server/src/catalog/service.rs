//! Catalog Service
//!
//! Orchestrates repositories and the image store for the product
//! endpoints. Workflows are multi-step without transactions: image files
//! are written before the record, and on deletion files go first. A crash
//! between steps can orphan files but never leaves a record pointing at
//! data that was supposed to exist.

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use super::{ImageStore, MAX_PRODUCT_IMAGES, UploadedImage, product_code};
use crate::db::models::{Category, Product, ProductDraft, ProductExpanded, ProductPatch};
use crate::db::repository::{CategoryRepository, ProductRepository, product::ProductFilter};
use crate::utils::{AppError, AppResult};

pub struct CatalogService {
    products: ProductRepository,
    categories: CategoryRepository,
    images: ImageStore,
}

impl CatalogService {
    pub fn new(db: Surreal<Db>, images: ImageStore) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            categories: CategoryRepository::new(db),
            images,
        }
    }

    /// Create a product.
    ///
    /// Rejects more than [`MAX_PRODUCT_IMAGES`] files, an unknown
    /// category, and a live product with the same (name, gender, size,
    /// color) combination. The display code is derived from the current
    /// category population.
    pub async fn create_product(
        &self,
        draft: ProductDraft,
        images: Vec<UploadedImage>,
    ) -> AppResult<Product> {
        if images.len() > MAX_PRODUCT_IMAGES {
            return Err(AppError::validation(format!(
                "At most {} images are allowed per product",
                MAX_PRODUCT_IMAGES
            )));
        }

        let category = self.resolve_category(&draft.category).await?;
        let category_id = category_thing(&category)?;

        if self
            .products
            .find_duplicate(
                &draft.name,
                draft.gender.as_deref(),
                draft.size.as_deref(),
                draft.color.as_deref(),
            )
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Product already exists"));
        }

        let count = self.products.count_in_category(&category_id).await?;
        let product_id = product_code::generate(category.cat_no, count);

        let image_paths = self.images.store(&images).await?;

        let product = Product {
            id: None,
            product_id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: category_id,
            stock_quantity: draft.stock_quantity,
            gender: draft.gender,
            size: draft.size,
            color: draft.color,
            images: image_paths,
            is_deleted: false,
            is_profile_updated: false,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        Ok(self.products.create(product).await?)
    }

    /// Apply a partial update.
    ///
    /// Fields absent from the patch keep their stored values. A non-empty
    /// image batch replaces the stored set wholesale: old files are
    /// removed best-effort, new ones written, the path list swapped.
    pub async fn update_product(
        &self,
        id: &str,
        patch: ProductPatch,
        images: Vec<UploadedImage>,
    ) -> AppResult<Product> {
        patch.validate()?;
        if images.len() > MAX_PRODUCT_IMAGES {
            return Err(AppError::validation(format!(
                "At most {} images are allowed per product",
                MAX_PRODUCT_IMAGES
            )));
        }

        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        if let Some(category_ref) = &patch.category {
            let category = self.resolve_category(category_ref).await?;
            product.category = category_thing(&category)?;
        }

        product.apply_patch(&patch);

        if !images.is_empty() {
            self.images.remove(&product.images).await;
            product.images = self.images.store(&images).await?;
        }

        Ok(self.products.replace(id, product).await?)
    }

    /// Delete a product and its image files. Files go first; a file that
    /// refuses to die is logged and skipped, never blocking the record
    /// delete. There is no rollback if the record delete then fails.
    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        self.images.remove(&product.images).await;
        self.products.delete(id).await?;
        Ok(())
    }

    /// All live products, categories populated
    pub async fn list_products(&self) -> AppResult<Vec<ProductExpanded>> {
        Ok(self.products.find_all_expanded().await?)
    }

    /// Single product by record id
    pub async fn get_product(&self, id: &str) -> AppResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Filtered listing. An empty result is reported as not-found, which
    /// is what storefront clients expect from this endpoint.
    pub async fn filter_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let products = self.products.filter(filter).await?;
        if products.is_empty() {
            return Err(AppError::not_found("No products match the given filters"));
        }
        Ok(products)
    }

    /// Products narrowed by category name, gender and price range.
    ///
    /// An unknown category name is an error; a known category with no
    /// matching products is an empty list.
    pub async fn products_by_category(
        &self,
        category_name: Option<&str>,
        gender: Option<&str>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> AppResult<Vec<ProductExpanded>> {
        let category_id = match category_name {
            Some(name) => {
                let category = self
                    .categories
                    .find_by_name(name)
                    .await?
                    .ok_or_else(|| AppError::not_found("Category not found"))?;
                Some(category_thing(&category)?)
            }
            None => None,
        };

        Ok(self
            .products
            .find_by_category_expanded(category_id.as_ref(), gender, min_price, max_price)
            .await?)
    }

    async fn resolve_category(&self, category_ref: &str) -> AppResult<Category> {
        self.categories
            .find_by_id(category_ref)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }
}

fn category_thing(category: &Category) -> AppResult<Thing> {
    category
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Category record is missing its id"))
}
