//! Catalog Routes
//!
//! Reads are public; mutations require an authenticated admin. The role
//! gate is layered here, never checked inside handlers.

mod handler;

use axum::middleware as axum_middleware;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::auth::{require_auth, require_role};
use crate::core::ServerState;
use crate::db::models::UserRole;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let admin = Router::new()
        .route("/api/products/create", post(handler::create_product))
        .route("/api/products/update", put(handler::update_product))
        .route("/api/products/delete", delete(handler::delete_product))
        .route_layer(axum_middleware::from_fn(require_role(UserRole::Admin)))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/api/products", get(handler::list_products))
        .route("/api/products/filter", get(handler::filter_products))
        .route("/api/products/by-category", get(handler::products_by_category))
        .route("/api/products/detail", get(handler::product_detail))
        .merge(admin)
}
