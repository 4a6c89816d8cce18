//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub author: String,
    /// Department code, see `Department`
    pub department: String,
    /// Unique among books when present
    pub isbn: Option<String>,
    pub publisher: String,
    pub edition: String,
    pub cover_url: String,
    /// Copy / accession identifiers
    pub copies: Vec<String>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book about to be inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub author: String,
    pub department: String,
    pub isbn: Option<String>,
    pub publisher: String,
    pub edition: String,
    pub cover_url: String,
    pub copies: Vec<String>,
}

/// Book query parameters (API)
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema, Validate)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Free text matched against title, author and ISBN
    pub q: Option<String>,
    /// Department code filter
    pub department: Option<String>,
    #[validate(range(min = 1, max = 1_000_000))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<i64>,
}

impl BookQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }

    /// Rows to skip; saturates instead of overflowing on huge pages
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }

    /// Trimmed, non-empty search text
    pub fn search_text(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// One page of books
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
