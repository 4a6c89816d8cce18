//! Repository layer for book storage

pub mod books;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, NewBook},
};

pub use books::BooksRepository;
pub use memory::MemoryBookStore;

/// How a title is matched against stored titles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleLookup {
    /// Stored title must be byte-for-byte equal
    #[default]
    Exact,
    /// Titles compared after lower-casing both sides
    CaseInsensitive,
}

/// Book storage.
///
/// Writes fail with `AppError::Conflict` on a uniqueness violation (ISBN)
/// and `AppError::Validation` when the record breaks the schema.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Department codes accepted by the schema
    fn allowed_departments(&self) -> Vec<String>;

    /// Oldest book whose title matches, if any
    async fn find_by_title(&self, title: &str, lookup: TitleLookup) -> AppResult<Option<Book>>;

    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    /// Persist every field of an existing book
    async fn save(&self, book: &Book) -> AppResult<Book>;

    async fn get_by_id(&self, id: i32) -> AppResult<Book>;

    /// Search books with pagination, returning the page and the total count
    async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)>;
}

/// Translate a failed write into the storage error contract
pub(crate) fn map_write_error(err: sqlx::Error, isbn: Option<&str>) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return match isbn {
                Some(isbn) => AppError::Conflict(format!("ISBN {} already exists", isbn)),
                None => AppError::Conflict(db_err.message().to_string()),
            };
        }
        if db_err.is_check_violation() {
            return AppError::Validation(db_err.message().to_string());
        }
    }
    AppError::Database(err)
}
