use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::author::errors::AuthorError;
use crate::book::errors::BookError;
use crate::user::errors::UserError;

pub mod authors;
pub mod books;
pub mod health;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod users;

/// The single wire shape every operation outcome resolves to.
///
/// Success: `{success: true, statusCode, message, data}` with `data` null
/// when the payload is empty. Failure: `{success: false, statusCode,
/// message, error?}`. Nothing else ever reaches the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponseBody {
    pub success: bool,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// Successful operation outcome. Status must be in [200, 300).
#[derive(Debug, Clone)]
pub struct ApiSuccess(StatusCode, Json<ApiResponseBody>);

impl PartialEq for ApiSuccess {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl ApiSuccess {
    /// Envelope a payload with the default message: "Data found" when the
    /// payload carries something, "No data found" when it is null, an
    /// empty array, or an empty object.
    pub fn new<T: Serialize>(status: StatusCode, data: T) -> Self {
        Self::build(status, None, data)
    }

    /// Envelope a payload with an explicit message overriding the default.
    pub fn with_message<T: Serialize>(status: StatusCode, message: &str, data: T) -> Self {
        Self::build(status, Some(message.to_string()), data)
    }

    fn build<T: Serialize>(status: StatusCode, message: Option<String>, data: T) -> Self {
        let value = serde_json::to_value(data).unwrap_or(Value::Null);
        let has_data = !is_empty_payload(&value);

        let message = message.unwrap_or_else(|| {
            if has_data {
                "Data found".to_string()
            } else {
                "No data found".to_string()
            }
        });
        let data = if has_data { value } else { Value::Null };

        ApiSuccess(
            status,
            Json(ApiResponseBody {
                success: true,
                status_code: status.as_u16(),
                message,
                data: Some(data),
                error: None,
            }),
        )
    }
}

impl IntoResponse for ApiSuccess {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Closed error taxonomy. Every failure an operation can produce maps to
/// exactly one of these kinds; dispatch is on the kind, never on the
/// originating type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    UnprocessableEntity(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Internal error reached the response pipeline");

                // Release builds never put internal detail on the wire.
                let error = if cfg!(debug_assertions) {
                    Some(Value::String(detail))
                } else {
                    None
                };

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    error,
                )
            }
        };

        (
            status,
            Json(ApiResponseBody {
                success: false,
                status_code: status.as_u16(),
                message,
                data: None,
                error,
            }),
        )
            .into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::InvalidNickname(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::PasswordHash(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthorError> for ApiError {
    fn from(err: AuthorError) -> Self {
        match err {
            AuthorError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AuthorError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthorError::InvalidName(_)
            | AuthorError::InvalidEmail(_)
            | AuthorError::InvalidAuthorId(_) => ApiError::UnprocessableEntity(err.to_string()),
            AuthorError::DatabaseError(_) | AuthorError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_) | BookError::AuthorNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            BookError::InvalidTitle(_) | BookError::InvalidBookId(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            BookError::CountReconciliation(_)
            | BookError::DatabaseError(_)
            | BookError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}
