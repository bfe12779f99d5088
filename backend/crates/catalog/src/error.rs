//! Catalog Error Types
//!
//! Book and question errors, integrated with `kernel::error::AppError`.
//! Authentication and tag failures are delegated to `AuthError` so they
//! render exactly as they do on the account routes.

use auth::AuthError;
use auth::models::OwnershipTagError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Book not found")]
    BookNotFound,

    #[error("Question not found")]
    QuestionNotFound,

    /// A policy predicate refused the action
    #[error("Not allowed")]
    Forbidden,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::BookNotFound | CatalogError::QuestionNotFound => ErrorKind::NotFound,
            CatalogError::Forbidden => ErrorKind::Forbidden,
            CatalogError::Auth(e) => e.kind(),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Auth(e) => e.to_app_error(),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::Forbidden => {
                tracing::warn!("Catalog action denied");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}

impl From<OwnershipTagError> for CatalogError {
    fn from(err: OwnershipTagError) -> Self {
        CatalogError::Auth(AuthError::MalformedOwnershipTag(err))
    }
}
