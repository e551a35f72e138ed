use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Issue a fresh token for an already-verified caller.
///
/// The subject is re-resolved against the credential store: a token whose
/// user has since vanished cannot be renewed. The presented token is not
/// revoked and stays valid until its own expiry.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess, ApiError> {
    let user = state
        .user_service
        .get_user(&caller.user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => ApiError::Unauthorized("Unauthorized".to_string()),
            _ => ApiError::from(e),
        })?;

    let claims = auth::Claims::for_user(
        user.id,
        user.email.as_str(),
        state.jwt_expiration_hours,
    );

    let token = state
        .authenticator
        .generate_token(&claims)
        .map_err(|e| ApiError::InternalServerError(format!("Could not issue token: {}", e)))?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Token refreshed",
        RefreshResponseData { token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
