//! Catalog workflow tests against an embedded database
//! Run: cargo test -p pattern-server --test catalog_flow

use pattern_server::catalog::UploadedImage;
use pattern_server::core::{Config, ServerState};
use pattern_server::db::models::{CategoryCreate, ProductDraft, ProductPatch};
use pattern_server::db::repository::CategoryRepository;
use pattern_server::db::repository::product::ProductFilter;
use pattern_server::utils::AppError;
use rust_decimal::Decimal;

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(
        tmp.path().join("work").to_string_lossy().into_owned(),
        0,
        tmp.path().join("assets").to_string_lossy().into_owned(),
    );
    let state = ServerState::initialize(&config).await.unwrap();
    (state, tmp)
}

async fn seed_category(state: &ServerState, name: &str, cat_no: u32) -> String {
    let repo = CategoryRepository::new(state.get_db());
    let category = repo
        .create(CategoryCreate {
            name: name.to_string(),
            cat_no,
        })
        .await
        .unwrap();
    category.id.unwrap().to_raw()
}

fn draft(name: &str, category: &str, price: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: "test product".to_string(),
        price: Decimal::new(price, 0),
        category: category.to_string(),
        stock_quantity: 10,
        gender: Some("men".to_string()),
        size: Some("M".to_string()),
        color: Some("blue".to_string()),
    }
}

fn image(name: &str) -> UploadedImage {
    UploadedImage {
        original_name: name.to_string(),
        bytes: name.as_bytes().to_vec(),
    }
}

#[tokio::test]
async fn duplicate_variant_is_rejected() {
    let (state, _tmp) = test_state().await;
    let category = seed_category(&state, "shirts", 1).await;
    let catalog = state.catalog();

    catalog
        .create_product(draft("Linen Shirt", &category, 30), vec![])
        .await
        .unwrap();

    let err = catalog
        .create_product(draft("Linen Shirt", &category, 45), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {:?}", err);

    // A different size is a different variant, not a duplicate
    let mut variant = draft("Linen Shirt", &category, 30);
    variant.size = Some("L".to_string());
    catalog.create_product(variant, vec![]).await.unwrap();
}

#[tokio::test]
async fn display_code_counts_within_category() {
    let (state, _tmp) = test_state().await;
    let category = seed_category(&state, "coats", 7).await;
    let catalog = state.catalog();

    let first = catalog
        .create_product(draft("Coat A", &category, 100), vec![])
        .await
        .unwrap();
    assert_eq!(first.product_id, "PAT01CAT07");

    catalog
        .create_product(draft("Coat B", &category, 110), vec![])
        .await
        .unwrap();
    let third = catalog
        .create_product(draft("Coat C", &category, 120), vec![])
        .await
        .unwrap();
    assert_eq!(third.product_id, "PAT03CAT07");
}

#[tokio::test]
async fn create_with_unknown_category_fails() {
    let (state, _tmp) = test_state().await;
    let catalog = state.catalog();

    let err = catalog
        .create_product(draft("Orphan", "category:nope", 10), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn create_rejects_more_than_five_images() {
    let (state, _tmp) = test_state().await;
    let category = seed_category(&state, "hats", 2).await;

    let images: Vec<_> = (0..6).map(|i| image(&format!("img{}.jpg", i))).collect();
    let err = state
        .catalog()
        .create_product(draft("Hat", &category, 15), images)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {:?}", err);
}

#[tokio::test]
async fn partial_update_keeps_untouched_fields() {
    let (state, _tmp) = test_state().await;
    let category = seed_category(&state, "pants", 3).await;
    let catalog = state.catalog();

    let created = catalog
        .create_product(draft("Chinos", &category, 50), vec![])
        .await
        .unwrap();
    let id = created.id.as_ref().unwrap().to_raw();

    let patch = ProductPatch {
        price: Some(Decimal::new(40, 0)),
        ..Default::default()
    };
    let updated = catalog.update_product(&id, patch, vec![]).await.unwrap();

    assert_eq!(updated.price, Decimal::new(40, 0));
    assert_eq!(updated.name, "Chinos");
    assert_eq!(updated.description, "test product");
    assert_eq!(updated.size.as_deref(), Some("M"));
    assert!(updated.is_profile_updated);
}

#[tokio::test]
async fn update_replaces_images_wholesale() {
    let (state, _tmp) = test_state().await;
    let category = seed_category(&state, "shoes", 4).await;
    let catalog = state.catalog();

    let created = catalog
        .create_product(
            draft("Boots", &category, 80),
            vec![image("front.jpg"), image("back.jpg")],
        )
        .await
        .unwrap();
    let id = created.id.as_ref().unwrap().to_raw();
    assert_eq!(created.images.len(), 2);
    for path in &created.images {
        assert!(std::path::Path::new(path).exists());
    }

    let updated = catalog
        .update_product(&id, ProductPatch::default(), vec![image("new.jpg")])
        .await
        .unwrap();

    assert_eq!(updated.images.len(), 1);
    assert!(std::path::Path::new(&updated.images[0]).exists());
    for path in &created.images {
        assert!(!std::path::Path::new(path).exists(), "stale file {}", path);
    }
}

#[tokio::test]
async fn filter_price_bounds_are_inclusive_and_empty_is_not_found() {
    let (state, _tmp) = test_state().await;
    let category = seed_category(&state, "socks", 5).await;
    let catalog = state.catalog();

    for (name, price) in [("Low", 5), ("Mid", 10), ("High", 15)] {
        catalog
            .create_product(draft(name, &category, price), vec![])
            .await
            .unwrap();
    }

    let filter = ProductFilter {
        min_price: Some(Decimal::new(10, 0)),
        max_price: Some(Decimal::new(10, 0)),
        ..Default::default()
    };
    let matched = catalog.filter_products(&filter).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Mid");

    let filter = ProductFilter {
        min_price: Some(Decimal::new(1000, 0)),
        ..Default::default()
    };
    let err = catalog.filter_products(&filter).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn filter_sorts_by_price_ascending_by_default() {
    let (state, _tmp) = test_state().await;
    let category = seed_category(&state, "belts", 6).await;
    let catalog = state.catalog();

    for (name, price) in [("B", 20), ("A", 10), ("C", 30)] {
        catalog
            .create_product(draft(name, &category, price), vec![])
            .await
            .unwrap();
    }

    let products = catalog
        .filter_products(&ProductFilter::default())
        .await
        .unwrap();
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);

    let filter = ProductFilter {
        order: Some("desc".to_string()),
        ..Default::default()
    };
    let products = catalog.filter_products(&filter).await.unwrap();
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["C", "B", "A"]);
}

#[tokio::test]
async fn category_listing_distinguishes_empty_from_unknown() {
    let (state, _tmp) = test_state().await;
    seed_category(&state, "scarves", 8).await;
    let catalog = state.catalog();

    // Known category, no products: empty list, not an error
    let products = catalog
        .products_by_category(Some("scarves"), None, None, None)
        .await
        .unwrap();
    assert!(products.is_empty());

    // Unknown category name: error
    let err = catalog
        .products_by_category(Some("gloves"), None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);
}

#[tokio::test]
async fn delete_removes_record_and_image_files() {
    let (state, _tmp) = test_state().await;
    let category = seed_category(&state, "jackets", 9).await;
    let catalog = state.catalog();

    let created = catalog
        .create_product(
            draft("Parka", &category, 200),
            vec![image("a.jpg"), image("b.jpg")],
        )
        .await
        .unwrap();
    let id = created.id.as_ref().unwrap().to_raw();

    catalog.delete_product(&id).await.unwrap();

    for path in &created.images {
        assert!(!std::path::Path::new(path).exists(), "stale file {}", path);
    }
    let err = catalog.get_product(&id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);

    // Deleting again reports not-found
    let err = catalog.delete_product(&id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);
}
