//! In-process book store.
//!
//! Enforces the same schema rules as the `books` table: non-empty title,
//! department from the enumeration, and sparse ISBN uniqueness.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BookStore, TitleLookup};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, NewBook},
        department::Department,
    },
};

#[derive(Default)]
struct MemoryState {
    books: BTreeMap<i32, Book>,
    next_id: i32,
}

impl MemoryState {
    fn check_isbn_free(&self, isbn: Option<&str>, own_id: Option<i32>) -> AppResult<()> {
        let Some(isbn) = isbn else {
            return Ok(());
        };
        let taken = self
            .books
            .values()
            .any(|b| Some(b.id) != own_id && b.isbn.as_deref() == Some(isbn));
        if taken {
            return Err(AppError::Conflict(format!("ISBN {} already exists", isbn)));
        }
        Ok(())
    }
}

fn check_schema(title: &str, department: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Book title cannot be empty".to_string()));
    }
    if department.parse::<Department>().is_err() {
        return Err(AppError::Validation(format!("Invalid department: {}", department)));
    }
    Ok(())
}

#[derive(Default)]
pub struct MemoryBookStore {
    state: RwLock<MemoryState>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored book, ordered by id
    pub async fn all(&self) -> Vec<Book> {
        self.state.read().await.books.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.books.len()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    fn allowed_departments(&self) -> Vec<String> {
        Department::codes()
    }

    async fn find_by_title(&self, title: &str, lookup: TitleLookup) -> AppResult<Option<Book>> {
        let state = self.state.read().await;
        let wanted = title.to_lowercase();
        let found = state.books.values().find(|b| match lookup {
            TitleLookup::Exact => b.title == title,
            TitleLookup::CaseInsensitive => b.title.to_lowercase() == wanted,
        });
        Ok(found.cloned())
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        check_schema(&book.title, &book.department)?;

        let mut state = self.state.write().await;
        state.check_isbn_free(book.isbn.as_deref(), None)?;

        state.next_id += 1;
        let now = Utc::now();
        let stored = Book {
            id: state.next_id,
            title: book.title.clone(),
            description: book.description.clone(),
            author: book.author.clone(),
            department: book.department.clone(),
            isbn: book.isbn.clone(),
            publisher: book.publisher.clone(),
            edition: book.edition.clone(),
            cover_url: book.cover_url.clone(),
            copies: book.copies.clone(),
            available: true,
            created_at: now,
            updated_at: now,
        };
        state.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, book: &Book) -> AppResult<Book> {
        check_schema(&book.title, &book.department)?;

        let mut state = self.state.write().await;
        if !state.books.contains_key(&book.id) {
            return Err(AppError::NotFound(format!("Book {} not found", book.id)));
        }
        state.check_isbn_free(book.isbn.as_deref(), Some(book.id))?;

        let mut stored = book.clone();
        stored.updated_at = Utc::now();
        state.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.state
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let state = self.state.read().await;
        let text = query.search_text().map(str::to_lowercase);
        let department = query.department.as_deref().map(|d| d.trim().to_uppercase());

        let mut matching: Vec<&Book> = state
            .books
            .values()
            .filter(|b| match text {
                Some(ref t) => {
                    b.title.to_lowercase().contains(t)
                        || b.author.to_lowercase().contains(t)
                        || b.isbn.as_deref().is_some_and(|i| i.to_lowercase().contains(t))
                }
                None => true,
            })
            .filter(|b| department.as_deref().map_or(true, |d| b.department == d))
            .collect();
        matching.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

        let total = matching.len() as i64;
        let books = matching
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.per_page()).unwrap_or(0))
            .cloned()
            .collect();

        Ok((books, total))
    }
}
