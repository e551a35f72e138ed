use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::author::errors::AuthorNameError;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorId;
use crate::domain::author::models::AuthorName;
use crate::domain::author::models::CreateAuthorCommand;
use crate::domain::author::models::UpdateAuthorCommand;
use crate::domain::email::EmailAddress;
use crate::domain::email::EmailError;
use crate::inbound::http::router::AppState;

pub async fn list_authors(State(state): State<AppState>) -> Result<ApiSuccess, ApiError> {
    let authors = state
        .author_service
        .list_authors()
        .await
        .map_err(ApiError::from)?;

    let data: Vec<AuthorData> = authors.iter().map(AuthorData::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, data))
}

pub async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> Result<ApiSuccess, ApiError> {
    let author_id =
        AuthorId::from_string(&author_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let author = state
        .author_service
        .get_author(&author_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Author found",
        AuthorData::from(&author),
    ))
}

pub async fn create_author(
    State(state): State<AppState>,
    Json(body): Json<CreateAuthorRequest>,
) -> Result<ApiSuccess, ApiError> {
    let author = state
        .author_service
        .create_author(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::CREATED,
        "Author created",
        AuthorData::from(&author),
    ))
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
    Json(body): Json<UpdateAuthorRequest>,
) -> Result<ApiSuccess, ApiError> {
    let author_id =
        AuthorId::from_string(&author_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let author = state
        .author_service
        .update_author(&author_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Author updated",
        AuthorData::from(&author),
    ))
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> Result<ApiSuccess, ApiError> {
    let author_id =
        AuthorId::from_string(&author_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .author_service
        .delete_author(&author_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Author deleted",
        Value::Null,
    ))
}

/// HTTP request body for creating an author (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAuthorRequest {
    name: String,
    email: String,
    bio: Option<String>,
}

/// HTTP request body for a partial author update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateAuthorRequest {
    name: Option<String>,
    email: Option<String>,
    bio: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseAuthorRequestError {
    #[error("Invalid author name: {0}")]
    Name(#[from] AuthorNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl CreateAuthorRequest {
    fn try_into_command(self) -> Result<CreateAuthorCommand, ParseAuthorRequestError> {
        let name = AuthorName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        Ok(CreateAuthorCommand::new(name, email, self.bio))
    }
}

impl UpdateAuthorRequest {
    fn try_into_command(self) -> Result<UpdateAuthorCommand, ParseAuthorRequestError> {
        let name = self.name.map(AuthorName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        Ok(UpdateAuthorCommand {
            name,
            email,
            bio: self.bio,
        })
    }
}

impl From<ParseAuthorRequestError> for ApiError {
    fn from(err: ParseAuthorRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub published_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Author> for AuthorData {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name.as_str().to_string(),
            email: author.email.as_str().to_string(),
            bio: author.bio.clone(),
            published_count: author.published_count,
            created_at: author.created_at,
            updated_at: author.updated_at,
        }
    }
}
