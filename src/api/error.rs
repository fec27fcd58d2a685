use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::services::ExplorerError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),

    NoData { provider: &'static str },

    StorageError(String),

    UpstreamError { provider: &'static str, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NoData { provider } => write!(f, "No data from {}", provider),
            ApiError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            ApiError::UpstreamError { provider, message } => {
                write!(f, "{} error: {}", provider, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NoData { provider } => (
                StatusCode::NOT_FOUND,
                format!("No {} results for that location", provider),
            ),
            ApiError::StorageError(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            ApiError::UpstreamError { provider, message } => {
                tracing::warn!("{} API error: {}", provider, message);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{} service is unavailable", provider),
                )
            }
        };

        let body = Json(serde_json::json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        match err {
            ExplorerError::Store(msg) => ApiError::StorageError(msg),
            ExplorerError::Upstream { provider, message } => {
                ApiError::UpstreamError { provider, message }
            }
            ExplorerError::NoData { provider } => ApiError::NoData { provider },
            // A payload that violates the provider contract reads like any
            // other upstream failure from the outside.
            ExplorerError::Validation { provider, message } => {
                ApiError::UpstreamError { provider, message }
            }
        }
    }
}
