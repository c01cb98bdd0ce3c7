//! Catalog Handlers
//!
//! Create and update arrive as multipart forms (text fields plus up to
//! five `images` files); delete takes a JSON body; reads use query
//! strings. Handlers parse and validate, the catalog service does the
//! rest.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::{Json, Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::catalog::UploadedImage;
use crate::core::ServerState;
use crate::db::models::{ProductDraft, ProductPatch};
use crate::db::repository::product::ProductFilter;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// Multipart form split into text fields and image files
#[derive(Default)]
struct ProductForm {
    fields: HashMap<String, String>,
    images: Vec<UploadedImage>,
}

async fn read_form(mut multipart: Multipart) -> AppResult<ProductForm> {
    let mut form = ProductForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" {
            let original_name = field.file_name().unwrap_or("image").to_string();
            let bytes = field.bytes().await?.to_vec();
            form.images.push(UploadedImage {
                original_name,
                bytes,
            });
        } else {
            form.fields.insert(name, field.text().await?);
        }
    }
    Ok(form)
}

impl ProductForm {
    fn required(&self, name: &str) -> AppResult<String> {
        match self.fields.get(name) {
            Some(v) if !v.trim().is_empty() => Ok(v.clone()),
            _ => Err(AppError::validation(format!("{} is required", name))),
        }
    }

    fn optional(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn parse_price(&self, raw: &str) -> AppResult<Decimal> {
        let price = Decimal::from_str(raw)
            .map_err(|_| AppError::validation("price must be a number"))?;
        if price.is_sign_negative() {
            return Err(AppError::validation("price must not be negative"));
        }
        Ok(price)
    }

    fn parse_stock(&self, raw: &str) -> AppResult<u32> {
        raw.parse::<u32>()
            .map_err(|_| AppError::validation("stock_quantity must be a non-negative integer"))
    }

    fn into_draft(self) -> AppResult<(ProductDraft, Vec<UploadedImage>)> {
        let price = self.parse_price(&self.required("price")?)?;
        // Optional on create; an absent field means no stock yet
        let stock_quantity = match self.optional("stock_quantity") {
            Some(raw) => self.parse_stock(&raw)?,
            None => 0,
        };
        let draft = ProductDraft {
            name: self.required("name")?,
            description: self.required("description")?,
            price,
            category: self.required("category")?,
            stock_quantity,
            gender: self.optional("gender"),
            size: self.optional("size"),
            color: self.optional("color"),
        };
        Ok((draft, self.images))
    }

    fn into_patch(self) -> AppResult<(String, ProductPatch, Vec<UploadedImage>)> {
        let id = self.required("id")?;
        let price = match self.optional("price") {
            Some(raw) => Some(self.parse_price(&raw)?),
            None => None,
        };
        let stock_quantity = match self.optional("stock_quantity") {
            Some(raw) => Some(self.parse_stock(&raw)?),
            None => None,
        };
        let patch = ProductPatch {
            name: self.optional("name"),
            description: self.optional("description"),
            price,
            category: self.optional("category"),
            stock_quantity,
            gender: self.optional("gender"),
            size: self.optional("size"),
            color: self.optional("color"),
        };
        Ok((id, patch, self.images))
    }
}

/// Create product (admin)
pub async fn create_product(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let (draft, images) = form.into_draft()?;
    let product = state.catalog().create_product(draft, images).await?;
    Ok((
        StatusCode::CREATED,
        ok_with_message(product, "Product created"),
    ))
}

/// Update product (admin). The record id travels as the `id` form field.
pub async fn update_product(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let (id, patch, images) = form.into_patch()?;
    let product = state.catalog().update_product(&id, patch, images).await?;
    Ok(ok_with_message(product, "Product updated"))
}

#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    #[serde(default, alias = "productId")]
    pub product_id: Option<String>,
}

/// Delete product (admin)
pub async fn delete_product(
    State(state): State<ServerState>,
    Json(req): Json<DeleteProductRequest>,
) -> AppResult<impl IntoResponse> {
    let id = req
        .product_id
        .ok_or_else(|| AppError::validation("product_id is required"))?;
    state.catalog().delete_product(&id).await?;
    Ok(ok_with_message((), "Product deleted"))
}

/// List all live products with categories populated
pub async fn list_products(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let products = state.catalog().list_products().await?;
    Ok(ok(products))
}

// Aliases keep the camelCase names the original storefront clients send
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub size: Option<String>,
    pub color: Option<String>,
    #[serde(alias = "minPrice")]
    pub min_price: Option<Decimal>,
    #[serde(alias = "maxPrice")]
    pub max_price: Option<Decimal>,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// Filter products; zero matches is a 404
pub async fn filter_products(
    State(state): State<ServerState>,
    Query(query): Query<FilterQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = ProductFilter {
        size: query.size,
        color: query.color,
        min_price: query.min_price,
        max_price: query.max_price,
        sort_by: query.sort_by,
        order: query.order,
    };
    let products = state.catalog().filter_products(&filter).await?;
    Ok(ok(products))
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
    pub gender: Option<String>,
    #[serde(alias = "minPrice")]
    pub min_price: Option<Decimal>,
    #[serde(alias = "maxPrice")]
    pub max_price: Option<Decimal>,
}

/// Products by category name; a known category with no products is an
/// empty 200, an unknown name is a 404
pub async fn products_by_category(
    State(state): State<ServerState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<impl IntoResponse> {
    let products = state
        .catalog()
        .products_by_category(
            query.category.as_deref(),
            query.gender.as_deref(),
            query.min_price,
            query.max_price,
        )
        .await?;
    Ok(ok(products))
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(alias = "productId")]
    pub product_id: Option<String>,
}

/// Single product lookup by record id
pub async fn product_detail(
    State(state): State<ServerState>,
    Query(query): Query<DetailQuery>,
) -> AppResult<impl IntoResponse> {
    let id = query
        .product_id
        .ok_or_else(|| AppError::validation("product_id is required"))?;
    let product = state.catalog().get_product(&id).await?;
    Ok(ok(product))
}
