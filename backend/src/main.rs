//! Main entry point for the ClipStream backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and wires the external media service before serving the
//! application router.

use clipstream_backend::app;
use clipstream_backend::config::Config;
use clipstream_backend::database::Database;
use clipstream_backend::services::media_service::{HttpMediaService, MediaStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();

    let media: Arc<dyn MediaStore> = Arc::new(HttpMediaService::new(&config));

    let router = app(pool, config.clone(), media);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting ClipStream server on port {}", config.server_port);
    axum::serve(listener, router).await.unwrap();
}
