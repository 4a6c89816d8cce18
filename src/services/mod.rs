//! Business logic services

pub mod catalog;
pub mod imports;

use std::sync::Arc;

use crate::{config::ImportConfig, repository::BookStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub imports: imports::ImportService,
}

impl Services {
    /// Create all services over the given book store
    pub fn new(store: Arc<dyn BookStore>, import_config: &ImportConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            imports: imports::ImportService::new(store, import_config.title_lookup),
        }
    }
}
