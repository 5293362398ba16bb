use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::ValidationError;
use database::DbError;
use serde_json::json;
use thiserror::Error;

/// The message every field-invariant failure carries on the wire.
pub const VALIDATION_MESSAGE: &str = "validation errors";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl AppError {
    /// Turns a store miss into a 404 carrying `message`; other failures keep
    /// their own mapping.
    pub fn lookup(message: &'static str) -> impl FnOnce(DbError) -> AppError {
        move |err| match err {
            DbError::NotFound => AppError::NotFound(message.to_string()),
            other => other.into(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// A missing entity answers with a singular `{"error": ...}` object; every
/// other failure answers with an `{"errors": [...]}` list.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(message) => {
                return (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response();
            }
            AppError::Validation(err) | AppError::Database(DbError::Validation(err)) => {
                tracing::debug!(error = %err, "Rejected write.");
                (StatusCode::BAD_REQUEST, VALIDATION_MESSAGE.to_string())
            }
            AppError::BadRequest(message) => {
                tracing::debug!(%message, "Malformed request.");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (StatusCode::INTERNAL_SERVER_ERROR, db_err.to_string())
            }
        };

        (status, Json(json!({ "errors": [body] }))).into_response()
    }
}
