use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::author::ports::AuthorRepository;
use crate::book::errors::BookError;
use crate::book::ports::BookRepository;
use crate::book::ports::BookServicePort;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::reconcile::ports::CounterReconciler;

/// Domain service implementation for book operations.
///
/// Book creation is the one mutation that reconciles the author's
/// published count synchronously, after the row is written. The write is
/// not rolled back if reconciliation fails; the scheduled pass converges
/// the count.
pub struct BookService<BR, AR, CR>
where
    BR: BookRepository,
    AR: AuthorRepository,
    CR: CounterReconciler,
{
    repository: Arc<BR>,
    authors: Arc<AR>,
    reconciler: Arc<CR>,
}

impl<BR, AR, CR> BookService<BR, AR, CR>
where
    BR: BookRepository,
    AR: AuthorRepository,
    CR: CounterReconciler,
{
    pub fn new(repository: Arc<BR>, authors: Arc<AR>, reconciler: Arc<CR>) -> Self {
        Self {
            repository,
            authors,
            reconciler,
        }
    }
}

#[async_trait]
impl<BR, AR, CR> BookServicePort for BookService<BR, AR, CR>
where
    BR: BookRepository,
    AR: AuthorRepository,
    CR: CounterReconciler,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        // Reject unknown authors before anything is written.
        let author = self
            .authors
            .find_by_id(&command.author_id)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?
            .ok_or_else(|| BookError::AuthorNotFound(command.author_id.to_string()))?;

        let now = Utc::now();
        let book = Book {
            id: BookId::new(),
            title: command.title,
            description: command.description,
            published_at: command.published_at,
            available: command.available,
            author_id: author.id,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(book).await?;

        if let Err(e) = self.reconciler.reconcile_one(&created.author_id).await {
            tracing::error!(
                book_id = %created.id,
                author_id = %created.author_id,
                error = %e,
                "Published count reconciliation failed after book creation"
            );
            return Err(BookError::CountReconciliation(e.to_string()));
        }

        Ok(created)
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id.to_string()))
    }

    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list_all().await
    }

    async fn update_book(
        &self,
        id: &BookId,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError> {
        let mut book = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id.to_string()))?;

        if let Some(new_author_id) = command.author_id {
            self.authors
                .find_by_id(&new_author_id)
                .await
                .map_err(|e| BookError::DatabaseError(e.to_string()))?
                .ok_or_else(|| BookError::AuthorNotFound(new_author_id.to_string()))?;
            book.author_id = new_author_id;
        }

        if let Some(new_title) = command.title {
            book.title = new_title;
        }

        if let Some(new_description) = command.description {
            book.description = Some(new_description);
        }

        if let Some(new_published_at) = command.published_at {
            book.published_at = Some(new_published_at);
        }

        if let Some(new_available) = command.available {
            book.available = new_available;
        }

        book.updated_at = Utc::now();

        self.repository.update(book).await
    }

    async fn delete_book(&self, id: &BookId) -> Result<(), BookError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::author::errors::AuthorError;
    use crate::domain::author::models::Author;
    use crate::domain::author::models::AuthorId;
    use crate::domain::author::models::AuthorName;
    use crate::domain::book::models::BookTitle;
    use crate::domain::email::EmailAddress;
    use crate::reconcile::errors::ReconcileError;
    use crate::reconcile::ports::ReconcileSummary;

    mock! {
        pub TestBookRepository {}

        #[async_trait]
        impl BookRepository for TestBookRepository {
            async fn create(&self, book: Book) -> Result<Book, BookError>;
            async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;
            async fn list_all(&self) -> Result<Vec<Book>, BookError>;
            async fn update(&self, book: Book) -> Result<Book, BookError>;
            async fn delete(&self, id: &BookId) -> Result<(), BookError>;
            async fn count_by_author(&self, author_id: &AuthorId) -> Result<i64, BookError>;
        }
    }

    mock! {
        pub TestAuthorRepository {}

        #[async_trait]
        impl AuthorRepository for TestAuthorRepository {
            async fn create(&self, author: Author) -> Result<Author, AuthorError>;
            async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, AuthorError>;
            async fn list_all(&self) -> Result<Vec<Author>, AuthorError>;
            async fn update(&self, author: Author) -> Result<Author, AuthorError>;
            async fn update_published_count(&self, id: &AuthorId, count: i64) -> Result<(), AuthorError>;
            async fn delete(&self, id: &AuthorId) -> Result<(), AuthorError>;
        }
    }

    mock! {
        pub TestReconciler {}

        #[async_trait]
        impl CounterReconciler for TestReconciler {
            async fn reconcile_one(&self, author_id: &AuthorId) -> Result<i64, ReconcileError>;
            async fn reconcile_all(&self) -> Result<ReconcileSummary, ReconcileError>;
        }
    }

    fn test_author(id: AuthorId) -> Author {
        let now = Utc::now();
        Author {
            id,
            name: AuthorName::new("Some Author".to_string()).unwrap(),
            email: EmailAddress::new("author@example.com".to_string()).unwrap(),
            bio: None,
            published_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_command(author_id: AuthorId) -> CreateBookCommand {
        CreateBookCommand {
            title: BookTitle::new("The Dispossessed".to_string()).unwrap(),
            description: None,
            published_at: None,
            available: true,
            author_id,
        }
    }

    #[tokio::test]
    async fn test_create_book_reconciles_after_write() {
        let mut books = MockTestBookRepository::new();
        let mut authors = MockTestAuthorRepository::new();
        let mut reconciler = MockTestReconciler::new();

        let author_id = AuthorId::new();
        let author = test_author(author_id);

        authors
            .expect_find_by_id()
            .withf(move |id| *id == author_id)
            .times(1)
            .returning(move |_| Ok(Some(author.clone())));

        books
            .expect_create()
            .withf(move |book| book.author_id == author_id)
            .times(1)
            .returning(Ok);

        reconciler
            .expect_reconcile_one()
            .withf(move |id| *id == author_id)
            .times(1)
            .returning(|_| Ok(1));

        let service = BookService::new(Arc::new(books), Arc::new(authors), Arc::new(reconciler));

        let book = service.create_book(create_command(author_id)).await.unwrap();
        assert_eq!(book.author_id, author_id);
        assert_eq!(book.title.as_str(), "The Dispossessed");
    }

    #[tokio::test]
    async fn test_create_book_unknown_author_writes_nothing() {
        let mut books = MockTestBookRepository::new();
        let mut authors = MockTestAuthorRepository::new();
        let mut reconciler = MockTestReconciler::new();

        authors
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        // Neither the insert nor the reconciliation may run.
        books.expect_create().times(0);
        reconciler.expect_reconcile_one().times(0);

        let service = BookService::new(Arc::new(books), Arc::new(authors), Arc::new(reconciler));

        let result = service.create_book(create_command(AuthorId::new())).await;
        assert!(matches!(result.unwrap_err(), BookError::AuthorNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_book_reconcile_failure_surfaces() {
        let mut books = MockTestBookRepository::new();
        let mut authors = MockTestAuthorRepository::new();
        let mut reconciler = MockTestReconciler::new();

        let author_id = AuthorId::new();
        let author = test_author(author_id);

        authors
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(author.clone())));

        books.expect_create().times(1).returning(Ok);

        reconciler
            .expect_reconcile_one()
            .times(1)
            .returning(|_| Err(ReconcileError::PersistFailed("timeout".to_string())));

        let service = BookService::new(Arc::new(books), Arc::new(authors), Arc::new(reconciler));

        // The book row stays written; the operation still reports failure.
        let result = service.create_book(create_command(author_id)).await;
        assert!(matches!(
            result.unwrap_err(),
            BookError::CountReconciliation(_)
        ));
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut books = MockTestBookRepository::new();
        let authors = MockTestAuthorRepository::new();
        let reconciler = MockTestReconciler::new();

        books.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = BookService::new(Arc::new(books), Arc::new(authors), Arc::new(reconciler));

        let result = service.get_book(&BookId::new()).await;
        assert!(matches!(result.unwrap_err(), BookError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_book_unknown_author_rejected() {
        let mut books = MockTestBookRepository::new();
        let mut authors = MockTestAuthorRepository::new();
        let reconciler = MockTestReconciler::new();

        let book_id = BookId::new();
        let now = Utc::now();
        let existing = Book {
            id: book_id,
            title: BookTitle::new("The Dispossessed".to_string()).unwrap(),
            description: None,
            published_at: None,
            available: true,
            author_id: AuthorId::new(),
            created_at: now,
            updated_at: now,
        };

        books
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        authors
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        books.expect_update().times(0);

        let service = BookService::new(Arc::new(books), Arc::new(authors), Arc::new(reconciler));

        let command = UpdateBookCommand {
            title: None,
            description: None,
            published_at: None,
            available: None,
            author_id: Some(AuthorId::new()),
        };

        let result = service.update_book(&book_id, command).await;
        assert!(matches!(result.unwrap_err(), BookError::AuthorNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_book_does_not_reconcile() {
        let mut books = MockTestBookRepository::new();
        let authors = MockTestAuthorRepository::new();
        let mut reconciler = MockTestReconciler::new();

        let book_id = BookId::new();
        books
            .expect_delete()
            .withf(move |id| *id == book_id)
            .times(1)
            .returning(|_| Ok(()));

        // Deletion leaves the count stale until the scheduled pass.
        reconciler.expect_reconcile_one().times(0);

        let service = BookService::new(Arc::new(books), Arc::new(authors), Arc::new(reconciler));

        assert!(service.delete_book(&book_id).await.is_ok());
    }
}
