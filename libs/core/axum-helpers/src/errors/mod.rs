pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every error leaving the service has this shape, whether it came from an
/// extractor rejection or a domain error.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Item not found or permission denied"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own errors into this type; `into_response`
/// logs at a level matching the class of failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Storage failure. The detail is logged, never sent to the client.
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Missing fields, wrong types and a missing content type all
            // count as a malformed body.
            AppError::JsonExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::UuidError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::UuidError(_) => ErrorCode::InvalidUuid,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();
        let error_code = code.code();

        let body = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code, "JSON extraction error: {:?}", e);
                ErrorResponse::new(code, e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code, "Validation error: {:?}", e);
                ErrorResponse::new(code, code.default_message())
                    .with_details(validation_details(&e))
            }
            AppError::UuidError(e) => {
                tracing::warn!(error_code, "UUID error: {:?}", e);
                ErrorResponse::new(code, code.default_message())
            }
            AppError::Database(detail) => {
                tracing::error!(error_code, "Database error: {}", detail);
                ErrorResponse::new(code, code.default_message())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code, "Internal server error: {}", msg);
                ErrorResponse::new(code, msg)
            }
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg) => {
                tracing::info!(error_code, status = status.as_u16(), "{}", msg);
                ErrorResponse::new(code, msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Field-keyed validation messages: `{"name": [{"code": "length", ...}]}`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;
    use validator::Validate;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let response = AppError::NotFound("Item not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["code"], 1004);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "Item not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let response =
            AppError::Database("relation \"skeleton_items\" does not exist".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "Database error occurred");
        assert!(!body.to_string().contains("skeleton_items"));
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let errors = Named {
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["name"][0]["code"], "length");
    }

    #[tokio::test]
    async fn test_json_rejection_is_bad_request() {
        let rejection = JsonRejection::from(
            axum::extract::rejection::MissingJsonContentType::default(),
        );
        let response = AppError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "JSON_EXTRACTION");
        assert_eq!(body["code"], 1003);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Database("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
