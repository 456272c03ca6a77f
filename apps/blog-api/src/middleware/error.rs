//! Error handling - maps failures to `{message}` responses.

use actix_web::http::{StatusCode, header::ContentType};
use actix_web::{HttpResponse, ResponseError};
use blog_shared::MessageResponse;
use std::fmt;

use blog_core::error::{DomainError, RepoError};

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// A required key is absent from a create body. Answered in plain text.
    MissingField(&'static str),
    BadRequest(String),
    NotFound,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingField(field) => write!(f, "Missing `{}` in request body", field),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::NotFound => write!(f, "Not Found"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::MissingField(_) => {
                return HttpResponse::build(self.status_code())
                    .content_type(ContentType::plaintext())
                    .body(self.to_string());
            }
            AppError::BadRequest(msg) => MessageResponse::new(msg.clone()),
            AppError::NotFound => MessageResponse::not_found(),
            AppError::Internal(detail) => {
                // Detail stays in the logs, never in the body
                tracing::error!("Internal error: {}", detail);
                MessageResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Document validation is enforced by the store, so a violation is a
/// store failure rather than a client error.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Internal(format!("Validation failed: {}", msg)),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound,
            RepoError::Connection(msg) => {
                AppError::Internal(format!("Database connection error: {}", msg))
            }
            RepoError::Query(msg) => AppError::Internal(format!("Database query error: {}", msg)),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_missing_field_is_plain_text() {
        let resp = AppError::MissingField("title").error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(body, "Missing `title` in request body");
    }

    #[actix_web::test]
    async fn test_internal_error_hides_detail() {
        let resp = AppError::from(RepoError::Query("relation missing".to_string())).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(body, r#"{"message":"internal server error"}"#);
    }

    #[test]
    fn test_domain_error_mapping() {
        let err: AppError = DomainError::Validation("bad".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = RepoError::NotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
