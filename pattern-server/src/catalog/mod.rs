//! Catalog Module
//!
//! Product lifecycle: creation with generated display codes, partial
//! updates, deletion with image cleanup, and the listing/filter queries.

pub mod image_store;
pub mod product_code;
pub mod service;

pub use image_store::{ImageStore, UploadedImage};
pub use service::CatalogService;

/// Upper bound on image files accepted per create/update request
pub const MAX_PRODUCT_IMAGES: usize = 5;
