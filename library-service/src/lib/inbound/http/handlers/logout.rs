use axum::http::StatusCode;
use serde_json::Value;

use super::ApiSuccess;

/// Acknowledge logout. Tokens are stateless, so there is nothing to revoke
/// server-side; the client discards its copy and the token dies at its own
/// expiry.
pub async fn logout() -> ApiSuccess {
    ApiSuccess::with_message(StatusCode::OK, "Logout successful", Value::Null)
}
