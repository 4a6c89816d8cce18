//! Catalog browsing service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPage, BookQuery},
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Search books with filters and pagination
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<BookPage> {
        query
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (books, total) = self.store.search(query).await?;
        Ok(BookPage {
            books,
            total,
            page: query.page(),
            per_page: query.per_page(),
        })
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.store.get_by_id(id).await
    }

    /// Department codes accepted by the book schema
    pub fn departments(&self) -> Vec<String> {
        self.store.allowed_departments()
    }
}
