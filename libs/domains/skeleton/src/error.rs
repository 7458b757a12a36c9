use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    /// Zero rows matched an owner-scoped write. A missing row and a row
    /// owned by someone else are deliberately indistinguishable.
    #[error("Item not found or permission denied")]
    NotFoundOrForbidden,

    #[error("User not authenticated")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl SkeletonError {
    /// Wrap a storage error with the operation that failed.
    pub fn persistence(context: &str, err: impl std::fmt::Display) -> Self {
        SkeletonError::Persistence(format!("{}: {}", context, err))
    }
}

pub type SkeletonResult<T> = Result<T, SkeletonError>;

/// Convert SkeletonError to AppError for standardized error responses
impl From<SkeletonError> for AppError {
    fn from(err: SkeletonError) -> Self {
        match err {
            SkeletonError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
            SkeletonError::NotFoundOrForbidden => {
                AppError::NotFound(SkeletonError::NotFoundOrForbidden.to_string())
            }
            SkeletonError::Unauthenticated => {
                AppError::Unauthorized(SkeletonError::Unauthenticated.to_string())
            }
            SkeletonError::Validation(msg) => AppError::BadRequest(msg),
            SkeletonError::InvalidConfig(msg) => AppError::InternalServerError(msg),
            SkeletonError::Persistence(detail) => AppError::Database(detail),
        }
    }
}

impl IntoResponse for SkeletonError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (SkeletonError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (SkeletonError::NotFoundOrForbidden, StatusCode::NOT_FOUND),
            (SkeletonError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (SkeletonError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                SkeletonError::persistence("failed to create item", "connection reset"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_persistence_keeps_context() {
        let err = SkeletonError::persistence("failed to delete item", "pool timed out");
        assert_eq!(
            err.to_string(),
            "Persistence error: failed to delete item: pool timed out"
        );
    }
}
