pub mod health;
pub mod index;

use axum::{http::Uri, routing::get, Router};
use tower_http::{compression::CompressionLayer, services::ServeDir};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        .nest_service("/public", assets)
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .with_state(state)
}
