//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rigshop_core::auth::AuthError;
use rigshop_core::cart::CartError;
use rigshop_core::catalog::CatalogError;
use rigshop_core::configurator::ConfiguratorError;
use rigshop_core::reviews::ReviewError;
use rigshop_core::support::SupportError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Unprocessable(m) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable", m.as_str())
            }
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.as_str()),
            AppError::Internal(detail) => {
                error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Validation("Invalid credentials".into()),
            AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            CatalogError::Validation(msg) => AppError::Validation(msg),
            CatalogError::Corrupt(msg) => AppError::Internal(msg),
            CatalogError::DbError(e) => AppError::from(e),
        }
    }
}

impl From<ConfiguratorError> for AppError {
    fn from(e: ConfiguratorError) -> Self {
        match e {
            ConfiguratorError::Validation(msg) => AppError::Validation(msg),
            ConfiguratorError::Catalog(e) => AppError::from(e),
            ConfiguratorError::DbError(e) => AppError::from(e),
            ConfiguratorError::Corrupt(msg) => AppError::Internal(msg),
        }
    }
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::NotFound(msg) => AppError::NotFound(msg),
            CartError::Validation(msg) => AppError::Validation(msg),
            CartError::InsufficientStock => AppError::Validation("Insufficient stock".into()),
            CartError::Conflict(msg) => AppError::Conflict(msg),
            CartError::DbError(e) => AppError::from(e),
        }
    }
}

impl From<ReviewError> for AppError {
    fn from(e: ReviewError) -> Self {
        match e {
            ReviewError::NotFound(msg) => AppError::NotFound(msg),
            e @ ReviewError::InvalidRating(_) => AppError::Unprocessable(e.to_string()),
            e @ ReviewError::AlreadyReviewed => AppError::Validation(e.to_string()),
            ReviewError::DbError(e) => AppError::from(e),
        }
    }
}

impl From<SupportError> for AppError {
    fn from(e: SupportError) -> Self {
        match e {
            SupportError::NotFound(msg) => AppError::NotFound(msg),
            SupportError::Validation(msg) => AppError::Validation(msg),
            SupportError::DbError(e) => AppError::from(e),
        }
    }
}
