use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use directory::DirectoryError;
use heallink::PipelineError;
use matcher::MatchError;
use profile::ProfileError;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid profile: {0}")]
    Profile(#[from] ProfileError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServerError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServerError::Match(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Directory(err) => match err {
                DirectoryError::DuplicateEmail(_) => StatusCode::CONFLICT,
                DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
                DirectoryError::InvalidProfile(_) => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Pipeline(err) => match err {
                PipelineError::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::Match(_) => StatusCode::BAD_REQUEST,
            },
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Authentication(_) => "AUTH_FAILED",
            ServerError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ServerError::Profile(ProfileError::UnknownValue { .. }) => "UNKNOWN_CATALOG_VALUE",
            ServerError::Profile(_) => "INVALID_PROFILE",
            ServerError::Directory(err) => match err {
                DirectoryError::DuplicateEmail(_) => "DUPLICATE_EMAIL",
                DirectoryError::NotFound(_) => "NOT_FOUND",
                DirectoryError::InvalidProfile(_) => "INVALID_PROFILE",
                _ => "DIRECTORY_ERROR",
            },
            ServerError::Match(_) => "MATCH_ERROR",
            ServerError::Pipeline(PipelineError::Profile(_)) => "SEEKER_INCOMPLETE",
            ServerError::Pipeline(PipelineError::Match(_)) => "MATCH_ERROR",
            ServerError::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
