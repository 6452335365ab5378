use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Message shown to end users for every failed lookup.
pub const GENERIC_LOOKUP_MESSAGE: &str = "Failed to load data. Please check the city name";

/// Structured error types for the weather lookup
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Coarse classification of an [`AppError`], exposed to callers that want
/// finer-grained messaging than the generic lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Upstream transport failure or non-2xx status.
    Provider,
    /// Upstream answered 2xx but the payload could not be normalized.
    MalformedResponse,
    Storage,
    Config,
    Validation,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    pub detail: String,
}

impl AppError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NetworkError(_) | AppError::HttpError { .. } => ErrorKind::Provider,
            AppError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            AppError::StorageError(_) => ErrorKind::Storage,
            AppError::ConfigError(_) => ErrorKind::Config,
            AppError::ValidationError(_) => ErrorKind::Validation,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::HttpError { status: 404, .. } => StatusCode::NOT_FOUND,
            AppError::HttpError { .. } | AppError::NetworkError(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::StorageError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(ErrorResponse {
            error: GENERIC_LOOKUP_MESSAGE.to_string(),
            kind: self.kind(),
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}
