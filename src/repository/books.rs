//! Books repository for PostgreSQL

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::{map_write_error, BookStore, TitleLookup};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, NewBook},
        department::Department,
    },
};

const BOOK_COLUMNS: &str = "id, title, description, author, department, isbn, publisher, edition, \
     cover_url, copies, available, created_at, updated_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &BookQuery) {
    qb.push(" WHERE 1=1");

    if let Some(text) = query.search_text() {
        let pattern = format!("%{}%", text);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR author ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR isbn ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(ref department) = query.department {
        qb.push(" AND department = ").push_bind(department.trim().to_uppercase());
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    fn allowed_departments(&self) -> Vec<String> {
        Department::codes()
    }

    async fn find_by_title(&self, title: &str, lookup: TitleLookup) -> AppResult<Option<Book>> {
        let condition = match lookup {
            TitleLookup::Exact => "title = $1",
            TitleLookup::CaseInsensitive => "lower(title) = lower($1)",
        };
        let sql = format!(
            "SELECT {} FROM books WHERE {} ORDER BY id LIMIT 1",
            BOOK_COLUMNS, condition
        );

        let book = sqlx::query_as::<_, Book>(&sql)
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let sql = format!(
            r#"
            INSERT INTO books (title, description, author, department, isbn,
                               publisher, edition, cover_url, copies)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        sqlx::query_as::<_, Book>(&sql)
            .bind(&book.title)
            .bind(&book.description)
            .bind(&book.author)
            .bind(&book.department)
            .bind(&book.isbn)
            .bind(&book.publisher)
            .bind(&book.edition)
            .bind(&book.cover_url)
            .bind(&book.copies)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, book.isbn.as_deref()))
    }

    async fn save(&self, book: &Book) -> AppResult<Book> {
        let sql = format!(
            r#"
            UPDATE books
            SET title = $1, description = $2, author = $3, department = $4, isbn = $5,
                publisher = $6, edition = $7, cover_url = $8, copies = $9, available = $10,
                updated_at = NOW()
            WHERE id = $11
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        sqlx::query_as::<_, Book>(&sql)
            .bind(&book.title)
            .bind(&book.description)
            .bind(&book.author)
            .bind(&book.department)
            .bind(&book.isbn)
            .bind(&book.publisher)
            .bind(&book.edition)
            .bind(&book.cover_url)
            .bind(&book.copies)
            .bind(book.available)
            .bind(book.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, book.isbn.as_deref()))?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book.id)))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM books", BOOK_COLUMNS));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY title, id LIMIT ")
            .push_bind(query.per_page())
            .push(" OFFSET ")
            .push_bind(query.offset());

        let books = qb.build_query_as::<Book>().fetch_all(&self.pool).await?;

        Ok((books, total))
    }
}
