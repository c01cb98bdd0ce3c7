//! Account Routes
//!
//! Registration and login are public. The user listing is admin-only;
//! the single-user lookup is customer-only (the storefront profile
//! endpoint, intentionally closed to admin tokens).

mod handler;

use axum::middleware as axum_middleware;
use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{require_auth, require_role};
use crate::core::ServerState;
use crate::db::models::UserRole;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let admin = Router::new()
        .route("/api/users", get(handler::list_users))
        .route_layer(axum_middleware::from_fn(require_role(UserRole::Admin)))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let customer = Router::new()
        .route("/api/users/detail", post(handler::user_detail))
        .route_layer(axum_middleware::from_fn(require_role(UserRole::Customer)))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/api/users/register", post(handler::register))
        .route("/api/users/login", post(handler::login))
        .merge(admin)
        .merge(customer)
}
