use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::book::errors::BookError;
use crate::book::ports::BookRepository;
use crate::domain::author::models::AuthorId;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> BookError {
    BookError::DatabaseError(e.to_string())
}

fn map_row(row: &PgRow) -> Result<Book, BookError> {
    Ok(Book {
        id: BookId(row.try_get("id").map_err(db_err)?),
        title: BookTitle::new(row.try_get("title").map_err(db_err)?)?,
        description: row.try_get("description").map_err(db_err)?,
        published_at: row.try_get("published_at").map_err(db_err)?,
        available: row.try_get("available").map_err(db_err)?,
        author_id: AuthorId(row.try_get("author_id").map_err(db_err)?),
        created_at: row.try_get("created_at").map_err(db_err)?,
        updated_at: row.try_get("updated_at").map_err(db_err)?,
    })
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        sqlx::query(
            r#"
            INSERT INTO books
                (id, title, description, published_at, available, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(&book.description)
        .bind(book.published_at)
        .bind(book.available)
        .bind(book.author_id.0)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(book)
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, published_at, available, author_id,
                   created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, published_at, available, author_id,
                   created_at, updated_at
            FROM books
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_row).collect()
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, description = $3, published_at = $4, available = $5,
                author_id = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(&book.description)
        .bind(book.published_at)
        .bind(book.available)
        .bind(book.author_id.0)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(book.id.to_string()));
        }

        Ok(book)
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn count_by_author(&self, author_id: &AuthorId) -> Result<i64, BookError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM books
            WHERE author_id = $1
            "#,
        )
        .bind(author_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        row.try_get("count").map_err(db_err)
    }
}
