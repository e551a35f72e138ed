use async_trait::async_trait;

use crate::author::errors::AuthorError;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorId;
use crate::domain::author::models::CreateAuthorCommand;
use crate::domain::author::models::UpdateAuthorCommand;

/// Port for author domain service operations.
#[async_trait]
pub trait AuthorServicePort: Send + Sync + 'static {
    /// Create a new author with a zero published count.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_author(&self, command: CreateAuthorCommand) -> Result<Author, AuthorError>;

    /// Retrieve an author by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Author does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_author(&self, id: &AuthorId) -> Result<Author, AuthorError>;

    /// Retrieve all authors.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_authors(&self) -> Result<Vec<Author>, AuthorError>;

    /// Update an existing author. Never touches `published_count`.
    ///
    /// # Errors
    /// * `NotFound` - Author does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_author(
        &self,
        id: &AuthorId,
        command: UpdateAuthorCommand,
    ) -> Result<Author, AuthorError>;

    /// Delete an existing author.
    ///
    /// # Errors
    /// * `NotFound` - Author does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_author(&self, id: &AuthorId) -> Result<(), AuthorError>;
}

/// Persistence operations for the author aggregate.
#[async_trait]
pub trait AuthorRepository: Send + Sync + 'static {
    /// Persist a new author.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, author: Author) -> Result<Author, AuthorError>;

    /// Retrieve an author by identifier, None if absent.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, AuthorError>;

    /// Retrieve all authors.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Author>, AuthorError>;

    /// Update name, email, and bio of an existing author.
    ///
    /// Deliberately excludes `published_count`; that column belongs to
    /// [`update_published_count`](AuthorRepository::update_published_count).
    ///
    /// # Errors
    /// * `NotFound` - Author does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, author: Author) -> Result<Author, AuthorError>;

    /// Persist a freshly recomputed published count. Single-row write.
    ///
    /// # Errors
    /// * `NotFound` - Author does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_published_count(&self, id: &AuthorId, count: i64) -> Result<(), AuthorError>;

    /// Remove an author.
    ///
    /// # Errors
    /// * `NotFound` - Author does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AuthorId) -> Result<(), AuthorError>;
}
