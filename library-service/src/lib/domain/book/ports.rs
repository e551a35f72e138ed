use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::domain::author::models::AuthorId;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;

/// Port for book domain service operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Create a new book for an existing author and reconcile that
    /// author's published count.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Referenced author does not exist; nothing is
    ///   written
    /// * `CountReconciliation` - Book was written but the count update
    ///   failed
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// Retrieve a book by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;

    /// Retrieve all books.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Update an existing book with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `AuthorNotFound` - New author reference does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_book(&self, id: &BookId, command: UpdateBookCommand)
        -> Result<Book, BookError>;

    /// Delete an existing book.
    ///
    /// Deletion does not reconcile synchronously; the scheduled pass
    /// corrects the author's count.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, id: &BookId) -> Result<(), BookError>;
}

/// Persistence operations for the book aggregate.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Persist a new book.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    /// Retrieve a book by identifier, None if absent.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    /// Retrieve all books.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    /// Update an existing book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// Remove a book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &BookId) -> Result<(), BookError>;

    /// Count books referencing an author. Authoritative source for the
    /// author's derived `published_count`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count_by_author(&self, author_id: &AuthorId) -> Result<i64, BookError>;
}
