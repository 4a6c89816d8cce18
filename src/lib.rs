//! Campus Catalog
//!
//! University library catalog server: book browsing plus bulk import of
//! book records from spreadsheets, over a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state around a book store
    pub fn new(config: AppConfig, store: Arc<dyn repository::BookStore>) -> Self {
        let services = services::Services::new(store, &config.import);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
