use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("lesson {lesson_id} has {available} space(s) left but {requested} requested")]
    InsufficientSpaces {
        lesson_id: String,
        requested: i32,
        available: i32,
    },
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("transaction could not be completed")]
    TransactionError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            AppError::UnprocessableEntity(_)
            | AppError::ValidationError(_)
            | AppError::ConversionEntityError(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientSpaces { .. } => StatusCode::CONFLICT,
            AppError::SpecificOperationError(_)
            | AppError::TransactionError(_)
            | AppError::NoRowsAffectedError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "unexpected error happened"
            );
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
