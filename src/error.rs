//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP responses
//! with JSON error bodies.
//!
//! Error mappings:
//! - `InvalidPath`, `BadRequest` → 400
//! - `NotFound` → 404
//! - `IsADirectory` → 409
//! - `NotText` → 415
//! - `Io` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Is a directory: {0}")]
    IsADirectory(String),

    #[error("Not a text file: {0}")]
    NotText(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Classify a filesystem error for `path`, keeping "not found" distinct
    /// from other storage failures.
    pub fn from_io(err: std::io::Error, path: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(path.to_string()),
            std::io::ErrorKind::IsADirectory => AppError::IsADirectory(path.to_string()),
            _ => AppError::Io(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPath(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::IsADirectory(_) => StatusCode::CONFLICT,
            AppError::NotText(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_is_classified() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(AppError::from_io(err, "a.md"), AppError::NotFound(p) if p == "a.md"));
    }

    #[test]
    fn other_io_errors_stay_io() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let app = AppError::from_io(err, "a.md");
        assert!(matches!(app, AppError::Io(_)));
        assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::InvalidPath("..".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::IsADirectory("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotText("x".into()).status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
