//! API handlers for the catalog REST endpoints

pub mod books;
pub mod health;
pub mod imports;
pub mod openapi;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/departments", get(books::list_departments))
        .route("/books", get(books::list_books))
        .route("/books/:id", get(books::get_book))
        .route(
            "/books/import",
            post(imports::import_books).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
