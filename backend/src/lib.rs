//! ClipStream backend library.
//!
//! Exposes the module tree and the application router so that the binary
//! entry point and the integration tests drive the same stack.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::api::common::ApiResponse;
use crate::config::Config;
use crate::services::media_service::MediaStore;
use axum::{Extension, Router, response::Json, routing::get};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Builds the application router with all routes and shared state attached.
pub fn app(pool: SqlitePool, config: Config, media: Arc<dyn MediaStore>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router())
        .nest("/api/user", api::user::routes::user_router())
        .layer(Extension(pool))
        .layer(Extension(config))
        .layer(Extension(media))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "ClipStream Backend",
            "version": "0.1.0"
        }),
        "Welcome to the ClipStream API",
    ))
}
