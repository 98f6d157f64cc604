use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    /// No current identity, or credentials that did not match.
    #[error("Unauthorized")]
    Unauthorized,

    /// The current identity may not perform this mutation.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps a unique-constraint failure to `Duplicate` with a caller-facing message.
    pub fn duplicate_or(err: sqlx::Error, message: &str) -> Self {
        match AppError::from(err) {
            AppError::Duplicate(_) => AppError::Duplicate(message.to_string()),
            other => other,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Duplicate("Record already exists".to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::NotFound("Referenced record not found".to_string());
            }
        }

        tracing::error!("Database error: {:?}", err);
        AppError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage details never leave the process
        let error_message = match self {
            AppError::Database(_) | AppError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "success": false,
            "message": error_message,
            "data": null
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            AppError::Validation("bad".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Duplicate("taken".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Forbidden("no".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_database_sqlx_errors_are_generic_failures() {
        let err = AppError::duplicate_or(sqlx::Error::RowNotFound, "taken");
        assert!(matches!(err, AppError::Database(_)));
    }
}
