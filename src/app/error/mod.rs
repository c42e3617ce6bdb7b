use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::FieldError;
use crate::storage::StorageError;

pub mod schema;

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

/// A common error type that can be used throughout the API.
///
/// Can be returned in a `Result` from an API handler function. Every variant
/// maps to a status code and renders the uniform
/// `{"success": false, "error": "..."}` JSON body.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{}", join_messages(.0))]
    Validation(Vec<FieldError>),
    #[error("Invalid JSON in request body")]
    MalformedBody(#[source] JsonRejection),
    #[error("This email is already subscribed")]
    DuplicateEmail,
    #[error("Too many requests. Please try again later.")]
    RateLimited,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::DuplicateEmail => Self::DuplicateEmail,
            StorageError::Database(e) => Self::Unexpected(e.into()),
        }
    }
}

/// Axum allows you to return `Result` from handler functions, but the error
/// type also must be some sort of response type.
///
/// Internal errors are logged in full and answered with a generic message;
/// everything else surfaces its `Display` form to the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = match &self {
            Self::Unexpected(e) => {
                tracing::error!("{:?}", e);
                "Internal server error".to_owned()
            }
            other => {
                tracing::error!("{:?}", other);
                other.to_string()
            }
        };

        (
            self.status_code(),
            Json(schema::ErrorBody {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
