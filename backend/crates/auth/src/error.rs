//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Messages never carry password hashes
//! or raw tokens.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::ownership_tag::OwnershipTagError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier or wrong secret (Basic scheme)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, unknown or expired bearer token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Authenticated, but a policy predicate refused the action
    #[error("Not allowed")]
    Forbidden,

    #[error("Account not found")]
    AccountNotFound,

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Ownership tag could not be decoded; always handled fail-closed
    #[error("Malformed ownership tag")]
    MalformedOwnershipTag(#[from] OwnershipTagError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token string is held live by another account
    #[error("Session token already in use")]
    TokenCollision,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::Forbidden | AuthError::MalformedOwnershipTag(_) => ErrorKind::Forbidden,
            AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::UnprocessableEntity,
            AuthError::InvalidEmail(_) | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::TokenCollision | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// 401s carry the scheme the client should retry with. Store errors are
    /// flattened to a generic message so driver details never reach clients.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::InvalidCredentials => {
                AppError::unauthorized(self.to_string()).with_challenge("Basic")
            }
            AuthError::InvalidToken => {
                AppError::unauthorized(self.to_string()).with_challenge("Bearer")
            }
            // Tag details are not the caller's business
            AuthError::MalformedOwnershipTag(_) => AppError::forbidden("Not allowed"),
            AuthError::TokenCollision | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::TokenCollision => {
                tracing::warn!("Session token collision");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden | AuthError::MalformedOwnershipTag(_) => {
                tracing::warn!(error = %self, "Authorization denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
