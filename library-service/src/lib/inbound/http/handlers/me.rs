use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::register::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Return the caller's identity. The auth gate already verified the token
/// and attached the subject; this only resolves the current record.
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess, ApiError> {
    let user = state
        .user_service
        .get_user(&caller.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Current user",
        UserData::from(&user),
    ))
}
