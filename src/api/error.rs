use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorBody;
use crate::domain::error::DomainError;

pub const ANALYSIS_FAILED: &str = "An error occurred during text analysis.";
pub const MODELS_UNAVAILABLE: &str = "Models are not available.";
pub const NEWS_UPSTREAM_FAILED: &str = "Failed to fetch news from the provider.";

/// API-layer error type
#[derive(Debug)]
pub enum ApiError {
    /// 400 - Bad request (invalid input)
    BadRequest(String),

    /// 422 - Body could not be decoded into the request type
    Unprocessable(String),

    /// 500 - Internal error
    Internal(String),

    /// 502 - Upstream provider failed
    BadGateway(String),

    /// 503 - Service unavailable (models not loaded)
    Unavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::BadRequest(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::Internal(msg)
            | ApiError::BadGateway(msg)
            | ApiError::Unavailable(msg) => msg,
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

// Internal failures are logged here and replaced by a generic detail.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::BadRequest(msg),
            DomainError::Configuration(msg) => ApiError::Internal(msg),
            DomainError::ModelUnavailable(_) => ApiError::Unavailable(MODELS_UNAVAILABLE.into()),
            DomainError::Upstream(e) => {
                tracing::error!("Error fetching news from external API: {}", e);
                ApiError::BadGateway(NEWS_UPSTREAM_FAILED.into())
            }
            DomainError::Inference(e) | DomainError::Parse(e) | DomainError::ModelResolution(e) => {
                tracing::error!("Error during analysis: {}", e);
                ApiError::Internal(ANALYSIS_FAILED.into())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}
