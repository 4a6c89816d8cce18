//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookPage, BookQuery},
};

/// List books with search and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Page of books", body = BookPage),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookPage>> {
    let page = state.services.catalog.search_books(&query).await?;
    Ok(Json(page))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// List department codes accepted by the catalog
#[utoipa::path(
    get,
    path = "/departments",
    tag = "books",
    responses(
        (status = 200, description = "Department codes", body = Vec<String>)
    )
)]
pub async fn list_departments(State(state): State<crate::AppState>) -> Json<Vec<String>> {
    Json(state.services.catalog.departments())
}
