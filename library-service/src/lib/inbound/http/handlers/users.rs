use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::register::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::email::EmailAddress;
use crate::domain::email::EmailError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Nickname;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::NicknameError;

const MIN_PASSWORD_LENGTH: usize = 6;

pub async fn list_users(State(state): State<AppState>) -> Result<ApiSuccess, ApiError> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)?;

    let data: Vec<UserData> = users.iter().map(UserData::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, data))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "User found",
        UserData::from(&user),
    ))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess, ApiError> {
    let user = state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::CREATED,
        "User created",
        UserData::from(&user),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let user = state
        .user_service
        .update_user(&user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "User updated",
        UserData::from(&user),
    ))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "User deleted",
        Value::Null,
    ))
}

/// HTTP request body for creating a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    nickname: String,
    email: String,
    password: String,
}

/// HTTP request body for a partial user update
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    nickname: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUserRequestError {
    #[error("Invalid nickname: {0}")]
    Nickname(#[from] NicknameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
}

fn check_password(password: &str) -> Result<(), ParseUserRequestError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ParseUserRequestError::PasswordTooShort);
    }
    Ok(())
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseUserRequestError> {
        let nickname = Nickname::new(self.nickname)?;
        let email = EmailAddress::new(self.email)?;
        check_password(&self.password)?;
        Ok(CreateUserCommand::new(nickname, email, self.password))
    }
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, ParseUserRequestError> {
        let nickname = self.nickname.map(Nickname::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        if let Some(password) = self.password.as_deref() {
            check_password(password)?;
        }
        Ok(UpdateUserCommand {
            nickname,
            email,
            password: self.password,
        })
    }
}

impl From<ParseUserRequestError> for ApiError {
    fn from(err: ParseUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
