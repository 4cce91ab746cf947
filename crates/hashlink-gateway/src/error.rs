use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hashlink_coordinator::CoordinatorError;
use thiserror::Error;
use tracing::{error, warn};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("short code not found")]
    NotFound,
    #[error("failed to shorten url: {0}")]
    Shorten(#[source] CoordinatorError),
    #[error("failed to resolve short code: {0}")]
    Resolve(#[source] CoordinatorError),
    #[error("stored url is not a valid Location header: {0}")]
    InvalidLocation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidRequest(message) => {
                warn!(error = %message, "Rejected request");
                (StatusCode::BAD_REQUEST, message.clone())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Short URL not found".to_string()),
            AppError::Shorten(source) => {
                error!(error = %source, "Failed to shorten url");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate short URL".to_string(),
                )
            }
            AppError::Resolve(source) => {
                error!(error = %source, "Failed to resolve short code");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to retrieve original URL".to_string(),
                )
            }
            AppError::InvalidLocation(message) => {
                error!(error = %message, "Cannot redirect to stored url");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to retrieve original URL".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
