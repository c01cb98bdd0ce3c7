//! Health Routes

use axum::{Json, Router, routing::get};
use serde::Serialize;
use shared::ApiResponse;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}
