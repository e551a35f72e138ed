use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Verify credentials and mint a bearer token.
///
/// An unknown email and a wrong password answer differently on purpose —
/// the original API exposes "Password does not match" — both as 401.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess, ApiError> {
    let user = state
        .user_service
        .get_user_by_email(&body.email)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => ApiError::Unauthorized("Invalid credentials".to_string()),
            _ => ApiError::from(e),
        })?;

    let claims = auth::Claims::for_user(
        user.id,
        user.email.as_str(),
        state.jwt_expiration_hours,
    );

    let result = state
        .authenticator
        .authenticate(&body.password, &user.password_hash, &claims)
        .map_err(login_error)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Login successful",
        LoginResponseData {
            token: result.access_token,
        },
    ))
}

fn login_error(e: auth::AuthenticationError) -> ApiError {
    match e {
        auth::AuthenticationError::InvalidCredentials => {
            ApiError::Unauthorized("Password does not match".to_string())
        }
        auth::AuthenticationError::PasswordError(err) => {
            ApiError::InternalServerError(format!("Could not verify password: {}", err))
        }
        auth::AuthenticationError::JwtError(err) => {
            ApiError::InternalServerError(format!("Could not issue token: {}", err))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
