use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::book::errors::BookTitleError;
use crate::domain::author::models::AuthorId;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::inbound::http::router::AppState;

pub async fn list_books(State(state): State<AppState>) -> Result<ApiSuccess, ApiError> {
    let books = state
        .book_service
        .list_books()
        .await
        .map_err(ApiError::from)?;

    let data: Vec<BookData> = books.iter().map(BookData::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, data))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess, ApiError> {
    let book_id = BookId::from_string(&book_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let book = state
        .book_service
        .get_book(&book_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Book found",
        BookData::from(&book),
    ))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<CreateBookRequest>,
) -> Result<ApiSuccess, ApiError> {
    let book = state
        .book_service
        .create_book(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::CREATED,
        "Book created",
        BookData::from(&book),
    ))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Json(body): Json<UpdateBookRequest>,
) -> Result<ApiSuccess, ApiError> {
    let book_id = BookId::from_string(&book_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let book = state
        .book_service
        .update_book(&book_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Book updated",
        BookData::from(&book),
    ))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess, ApiError> {
    let book_id = BookId::from_string(&book_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .book_service
        .delete_book(&book_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Book deleted",
        Value::Null,
    ))
}

fn default_available() -> bool {
    true
}

/// HTTP request body for creating a book (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookRequest {
    title: String,
    description: Option<String>,
    published_at: Option<String>,
    #[serde(default = "default_available")]
    available: bool,
    author_id: String,
}

/// HTTP request body for a partial book update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateBookRequest {
    title: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    available: Option<bool>,
    author_id: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseBookRequestError {
    #[error("Invalid book title: {0}")]
    Title(#[from] BookTitleError),

    #[error("Invalid published_at date, expected YYYY-MM-DD: {0}")]
    PublishedAt(String),

    #[error("Invalid author id: {0}")]
    AuthorId(String),
}

fn parse_published_at(raw: &str) -> Result<NaiveDate, ParseBookRequestError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ParseBookRequestError::PublishedAt(e.to_string()))
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, ParseBookRequestError> {
        let title = BookTitle::new(self.title)?;
        let published_at = self
            .published_at
            .as_deref()
            .map(parse_published_at)
            .transpose()?;
        let author_id = AuthorId::from_string(&self.author_id)
            .map_err(|e| ParseBookRequestError::AuthorId(e.to_string()))?;

        Ok(CreateBookCommand {
            title,
            description: self.description,
            published_at,
            available: self.available,
            author_id,
        })
    }
}

impl UpdateBookRequest {
    fn try_into_command(self) -> Result<UpdateBookCommand, ParseBookRequestError> {
        let title = self.title.map(BookTitle::new).transpose()?;
        let published_at = self
            .published_at
            .as_deref()
            .map(parse_published_at)
            .transpose()?;
        let author_id = self
            .author_id
            .as_deref()
            .map(|raw| {
                AuthorId::from_string(raw)
                    .map_err(|e| ParseBookRequestError::AuthorId(e.to_string()))
            })
            .transpose()?;

        Ok(UpdateBookCommand {
            title,
            description: self.description,
            published_at,
            available: self.available,
            author_id,
        })
    }
}

impl From<ParseBookRequestError> for ApiError {
    fn from(err: ParseBookRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<NaiveDate>,
    pub available: bool,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.as_str().to_string(),
            description: book.description.clone(),
            published_at: book.published_at,
            available: book.available,
            author_id: book.author_id.to_string(),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}
