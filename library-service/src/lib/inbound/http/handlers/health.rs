use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn welcome() -> ApiSuccess {
    ApiSuccess::with_message(
        StatusCode::OK,
        "API active",
        HealthData {
            status: "OK",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

pub async fn health() -> ApiSuccess {
    ApiSuccess::with_message(
        StatusCode::OK,
        "API active",
        HealthData {
            status: "OK",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Router fallback: unknown routes still answer through the envelope.
pub async fn endpoint_not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
