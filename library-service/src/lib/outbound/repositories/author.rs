use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::author::errors::AuthorError;
use crate::author::ports::AuthorRepository;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorId;
use crate::domain::author::models::AuthorName;
use crate::domain::email::EmailAddress;

pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> AuthorError {
    AuthorError::DatabaseError(e.to_string())
}

fn map_row(row: &PgRow) -> Result<Author, AuthorError> {
    Ok(Author {
        id: AuthorId(row.try_get("id").map_err(db_err)?),
        name: AuthorName::new(row.try_get("name").map_err(db_err)?)?,
        email: EmailAddress::new(row.try_get("email").map_err(db_err)?)?,
        bio: row.try_get("bio").map_err(db_err)?,
        published_count: row.try_get("published_count").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
        updated_at: row.try_get("updated_at").map_err(db_err)?,
    })
}

fn map_unique_violation(e: sqlx::Error, email: &EmailAddress) -> AuthorError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("authors_email_key") {
            return AuthorError::EmailAlreadyExists(email.as_str().to_string());
        }
    }
    AuthorError::DatabaseError(e.to_string())
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create(&self, author: Author) -> Result<Author, AuthorError> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, name, email, bio, published_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(author.id.0)
        .bind(author.name.as_str())
        .bind(author.email.as_str())
        .bind(&author.bio)
        .bind(author.published_count)
        .bind(author.created_at)
        .bind(author.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &author.email))?;

        Ok(author)
    }

    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, AuthorError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, bio, published_count, created_at, updated_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Author>, AuthorError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, bio, published_count, created_at, updated_at
            FROM authors
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_row).collect()
    }

    async fn update(&self, author: Author) -> Result<Author, AuthorError> {
        // published_count is deliberately absent: that column belongs to
        // update_published_count.
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET name = $2, email = $3, bio = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(author.id.0)
        .bind(author.name.as_str())
        .bind(author.email.as_str())
        .bind(&author.bio)
        .bind(author.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &author.email))?;

        if result.rows_affected() == 0 {
            return Err(AuthorError::NotFound(author.id.to_string()));
        }

        Ok(author)
    }

    async fn update_published_count(&self, id: &AuthorId, count: i64) -> Result<(), AuthorError> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET published_count = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(count)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(AuthorError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), AuthorError> {
        let result = sqlx::query(
            r#"
            DELETE FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(AuthorError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
