//! Custom error types for the web service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ModelError;

/// Errors that end a request without redisplaying a form
#[derive(Error, Debug)]
pub enum AppError {
    /// The submission could not be decoded
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    /// Data-access failure
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Session load or save failure
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::Model(ModelError::NoRecord) => StatusCode::NOT_FOUND,
            AppError::Model(_) | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Only the log sees what went wrong.
        if status.is_server_error() {
            error!("Server error: {}", self);
        }

        let body = status.canonical_reason().unwrap_or("Error").to_string();
        (status, body).into_response()
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;
