use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use library_service::author::errors::AuthorError;
use library_service::author::ports::AuthorRepository;
use library_service::book::errors::BookError;
use library_service::book::ports::BookRepository;
use library_service::domain::author::models::Author;
use library_service::domain::author::models::AuthorId;
use library_service::domain::author::service::AuthorService;
use library_service::domain::book::models::Book;
use library_service::domain::book::models::BookId;
use library_service::domain::book::service::BookService;
use library_service::domain::reconcile::service::ReconcileService;
use library_service::domain::user::models::User;
use library_service::domain::user::models::UserId;
use library_service::domain::user::service::UserService;
use library_service::inbound::http::router::create_router;
use library_service::inbound::http::router::AppState;
use library_service::user::errors::UserError;
use library_service::user::ports::UserRepository;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_JWT_EXPIRATION_HOURS: i64 = 1;

/// In-memory credential store standing in for Postgres so the suite runs
/// hermetically. Same contract as the real repository, including the
/// unique-email conflict.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.id != user.id && u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        if !users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        match self.users.lock().unwrap().remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}

#[derive(Default)]
pub struct InMemoryAuthorRepository {
    authors: Mutex<HashMap<Uuid, Author>>,
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn create(&self, author: Author) -> Result<Author, AuthorError> {
        let mut authors = self.authors.lock().unwrap();
        if authors
            .values()
            .any(|a| a.email.as_str() == author.email.as_str())
        {
            return Err(AuthorError::EmailAlreadyExists(
                author.email.as_str().to_string(),
            ));
        }
        authors.insert(author.id.0, author.clone());
        Ok(author)
    }

    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, AuthorError> {
        Ok(self.authors.lock().unwrap().get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Author>, AuthorError> {
        Ok(self.authors.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, author: Author) -> Result<Author, AuthorError> {
        let mut authors = self.authors.lock().unwrap();
        let existing = authors
            .get(&author.id.0)
            .cloned()
            .ok_or(AuthorError::NotFound(author.id.to_string()))?;

        // Mirror the SQL update: published_count is not written here.
        let mut stored = author.clone();
        stored.published_count = existing.published_count;
        authors.insert(stored.id.0, stored.clone());
        Ok(stored)
    }

    async fn update_published_count(&self, id: &AuthorId, count: i64) -> Result<(), AuthorError> {
        let mut authors = self.authors.lock().unwrap();
        match authors.get_mut(&id.0) {
            Some(author) => {
                author.published_count = count;
                Ok(())
            }
            None => Err(AuthorError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), AuthorError> {
        match self.authors.lock().unwrap().remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(AuthorError::NotFound(id.to_string())),
        }
    }
}

#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<HashMap<Uuid, Book>>,
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        self.books.lock().unwrap().insert(book.id.0, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        Ok(self.books.lock().unwrap().get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.books.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.lock().unwrap();
        if !books.contains_key(&book.id.0) {
            return Err(BookError::NotFound(book.id.to_string()));
        }
        books.insert(book.id.0, book.clone());
        Ok(book)
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        match self.books.lock().unwrap().remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(BookError::NotFound(id.to_string())),
        }
    }

    async fn count_by_author(&self, author_id: &AuthorId) -> Result<i64, BookError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.author_id == *author_id)
            .count() as i64)
    }
}

/// Test application that spawns the real router on a random port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub users: Arc<InMemoryUserRepository>,
    pub authors: Arc<InMemoryAuthorRepository>,
    pub books: Arc<InMemoryBookRepository>,
    pub reconciler: Arc<ReconcileService<InMemoryAuthorRepository, InMemoryBookRepository>>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let authors = Arc::new(InMemoryAuthorRepository::default());
        let books = Arc::new(InMemoryBookRepository::default());

        let reconciler = Arc::new(ReconcileService::new(
            Arc::clone(&authors),
            Arc::clone(&books),
        ));

        let user_service = Arc::new(UserService::new(Arc::clone(&users)));
        let author_service = Arc::new(AuthorService::new(Arc::clone(&authors)));
        let book_service = Arc::new(BookService::new(
            Arc::clone(&books),
            Arc::clone(&authors),
            Arc::clone(&reconciler),
        ));

        let state = AppState {
            user_service,
            author_service,
            book_service,
            authenticator: Arc::new(Authenticator::new(TEST_JWT_SECRET)),
            jwt_expiration_hours: TEST_JWT_EXPIRATION_HOURS,
        };

        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
            users,
            authors,
            books,
            reconciler,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Register a user and return (user_id, token).
    pub async fn register_user(&self, nickname: &str, email: &str, password: &str) -> (String, String) {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "nickname": nickname,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute register request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let user_id = body["data"]["user"]["id"].as_str().unwrap().to_string();
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (user_id, token)
    }

    /// Create an author through the API and return its id.
    pub async fn create_author(&self, token: &str, name: &str, email: &str) -> String {
        let response = self
            .post("/api/authors")
            .bearer_auth(token)
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "bio": "test author"
            }))
            .send()
            .await
            .expect("Failed to execute create author request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create a book through the API and return the raw response.
    pub async fn create_book(&self, token: &str, title: &str, author_id: &str) -> reqwest::Response {
        self.post("/api/books")
            .bearer_auth(token)
            .json(&serde_json::json!({
                "title": title,
                "author_id": author_id
            }))
            .send()
            .await
            .expect("Failed to execute create book request")
    }
}
