use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::response::{ApiResponse, Empty, ErrorDetail};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Duplicate field value entered")]
    DuplicateKey,

    #[error("Resource not found with id of {0}")]
    MalformedId(String),

    #[error("{0}")]
    Orm(DbErr),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::MalformedId(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) | AppError::DuplicateKey => {
                StatusCode::BAD_REQUEST
            }
            AppError::Orm(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateKey,
            _ => AppError::Orm(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "request rejected");
        }

        let error = match self {
            AppError::Validation(messages) => ErrorDetail::Many(messages),
            other => ErrorDetail::Single(other.to_string()),
        };

        (status, Json(ApiResponse::<Empty>::failure(error))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
