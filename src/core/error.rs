use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// A single field-level validation message, keyed by its wire path
/// (e.g. `invoiceLines[0].quantity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Draft rejected with one or more field-level messages
    #[error("Invalid invoice draft: {} field error(s)", .0.len())]
    InvalidDraft(Vec<FieldError>),

    /// ERP backend answered with a non-success status
    #[error("Backend error {status}: {message}")]
    Backend { status: u16, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or malformed session headers
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// HTTP client errors raised by the retry middleware stack
    #[error("HTTP client error: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        let body = match self {
            AppError::InvalidDraft(fields) => serde_json::json!({
                "error": {
                    "message": error_message,
                    "code": status_code.as_u16(),
                    "fields": fields,
                }
            }),
            _ => serde_json::json!({
                "error": {
                    "message": error_message,
                    "code": status_code.as_u16(),
                }
            }),
        };

        HttpResponse::build(status_code).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidDraft(_) => StatusCode::BAD_REQUEST,
            AppError::Backend { status, .. } => match *status {
                400 | 409 | 422 => StatusCode::UNPROCESSABLE_ENTITY,
                401 => StatusCode::UNAUTHORIZED,
                403 => StatusCode::FORBIDDEN,
                404 => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            },
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::HttpMiddleware(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn backend(status: u16, msg: impl Into<String>) -> Self {
        AppError::Backend {
            status,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
