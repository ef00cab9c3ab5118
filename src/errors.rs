use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::error::Error;
use std::fmt;
use validator::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// Connectivity or query execution failure, surfaced untouched.
    Storage(sqlx::Error),
    /// The requested record does not exist.
    NotFound(String),
    /// Malformed pagination or filter parameters.
    InvalidInput(String),
    /// The per-request deadline expired before storage answered.
    Timeout,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        use AppError::*;

        match self {
            Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            NotFound(_) => StatusCode::NOT_FOUND,
            InvalidInput(_) => StatusCode::BAD_REQUEST,
            Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn page(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => PAGE_404,
            StatusCode::BAD_REQUEST => PAGE_400,
            StatusCode::GATEWAY_TIMEOUT => PAGE_504,
            _ => PAGE_500,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Storage(ref error) => tracing::error!("sqlx error: {:?}", error),
            AppError::Timeout => tracing::error!("storage deadline exceeded"),
            AppError::InvalidInput(ref msg) => tracing::debug!("invalid input: {}", msg),
            AppError::NotFound(_) => {}
        }
        (self.status(), Html(self.page())).into_response()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Storage(err) => write!(f, "storage error: {}", err),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            AppError::Timeout => write!(f, "storage deadline exceeded"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err)
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::InvalidInput(err.to_string().replace('\n', "; "))
    }
}

pub fn invalid_input(msg: &str) -> AppError {
    AppError::InvalidInput(msg.to_string())
}

pub fn not_found(msg: &str) -> AppError {
    AppError::NotFound(msg.to_string())
}

pub static PAGE_400: &str = include_str!("../templates/400.html");
pub static PAGE_404: &str = include_str!("../templates/404.html");
pub static PAGE_500: &str = include_str!("../templates/500.html");
pub static PAGE_504: &str = include_str!("../templates/504.html");
