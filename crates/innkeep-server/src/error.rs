//! HTTP error responses.
//!
//! Every failure leaves the server as `{"message": "..."}`. Internal
//! failures are logged and reported with a generic message.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use innkeep_core::error::InnkeepError;
use innkeep_hotels::BookingError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body or form could not be read.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] InnkeepError),
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}

fn capitalize(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Domain(err) => match err {
                InnkeepError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
                InnkeepError::AlreadyExists { entity } => (
                    StatusCode::BAD_REQUEST,
                    format!("{} already exists", capitalize(entity)),
                ),
                InnkeepError::AuthenticationFailed { reason } => {
                    (StatusCode::BAD_REQUEST, reason.clone())
                }
                InnkeepError::BookingRejected { reason } => (StatusCode::BAD_REQUEST, reason.clone()),
                InnkeepError::Unauthorized { .. } => {
                    (StatusCode::UNAUTHORIZED, "unauthorized".into())
                }
                InnkeepError::NotFound { entity, .. } => {
                    (StatusCode::NOT_FOUND, format!("{} not found", capitalize(entity)))
                }
                InnkeepError::Database(_)
                | InnkeepError::Crypto(_)
                | InnkeepError::Upstream(_)
                | InnkeepError::Internal(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".into(),
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
