use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content provider unavailable: {0}")]
    ContentUnavailable(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("No questions generated: {0}")]
    EmptyContent(String),

    #[error("Quiz not completed: {0}")]
    NotCompleted(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ContentUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::EmptyContent(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotCompleted(_) => StatusCode::CONFLICT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;

        match err {
            OpenAIError::ApiError(api) => {
                if is_rate_limit_message(&api.message) {
                    AppError::RateLimited(api.message)
                } else {
                    AppError::ContentUnavailable(api.message)
                }
            }
            other => AppError::ContentUnavailable(other.to_string()),
        }
    }
}

/// Upstream rate limiting arrives as an API error body, not a typed variant,
/// so detection goes by message text.
fn is_rate_limit_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("rate limit")
        || lowered.contains("too many requests")
        || lowered.contains("quota")
        || lowered.contains("429")
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ContentUnavailable("test".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::RateLimited("test".into()).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::EmptyContent("test".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotCompleted("test".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("session abc".into());
        assert_eq!(err.to_string(), "Not found: session abc");

        let err = AppError::EmptyContent("topic 'quantum basket weaving'".into());
        assert_eq!(
            err.to_string(),
            "No questions generated: topic 'quantum basket weaving'"
        );
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(is_rate_limit_message("Rate limit reached for gpt-4o-mini"));
        assert!(is_rate_limit_message("You exceeded your current quota"));
        assert!(is_rate_limit_message("HTTP 429 Too Many Requests"));
        assert!(!is_rate_limit_message("The model is overloaded"));
    }

    #[test]
    fn test_openai_api_error_maps_to_rate_limited() {
        use async_openai::error::{ApiError, OpenAIError};

        let api = ApiError {
            message: "Rate limit reached for requests".to_string(),
            r#type: None,
            param: None,
            code: None,
        };
        let err: AppError = OpenAIError::ApiError(api).into();
        assert!(matches!(err, AppError::RateLimited(_)));
    }

    #[test]
    fn test_openai_api_error_maps_to_content_unavailable() {
        use async_openai::error::{ApiError, OpenAIError};

        let api = ApiError {
            message: "The server had an error processing your request".to_string(),
            r#type: None,
            param: None,
            code: None,
        };
        let err: AppError = OpenAIError::ApiError(api).into();
        assert!(matches!(err, AppError::ContentUnavailable(_)));
    }
}
