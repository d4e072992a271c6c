use axum::{
    extract::rejection::{BytesRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::shared::error_dto::{ErrorDetail, ErrorDetails, ErrorResponse};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Not Found - {0}")]
    NotFound(String),

    /// The provider rejected a synthesis call (4xx)
    #[error("{message}")]
    UpstreamBadRequest {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// The provider kept failing after the retry budget was spent (5xx)
    #[error("{message}")]
    UpstreamServerError {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// No response was received from the provider
    #[error("{message}")]
    UpstreamUnknown { message: String },

    /// Pass-through failure, relayed with the provider's status code
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    #[error("{0}")]
    RateLimited(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamBadRequest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamServerError { .. } => StatusCode::BAD_GATEWAY,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::UpstreamUnknown { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::RateLimited(_) => "RATE_LIMIT_EXCEEDED",
            Self::UpstreamBadRequest { .. } => "UPSTREAM_BAD_REQUEST",
            Self::UpstreamServerError { .. } => "UPSTREAM_SERVER_ERROR",
            Self::UpstreamUnknown { .. } | Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Status reported in the error details: the provider's own status for
    /// upstream failures, the response status otherwise
    fn detail_status(&self) -> u16 {
        match self {
            Self::UpstreamBadRequest { status, .. }
            | Self::UpstreamServerError { status, .. }
            | Self::Upstream { status, .. } => *status,
            _ => self.status_code().as_u16(),
        }
    }

    fn request_id(&self) -> Option<String> {
        match self {
            Self::UpstreamBadRequest { request_id, .. }
            | Self::UpstreamServerError { request_id, .. }
            | Self::Upstream { request_id, .. } => request_id.clone(),
            _ => None,
        }
    }

    /// Convert to the error envelope, without debug details
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                details: ErrorDetails {
                    status: self.detail_status(),
                    request_id: self.request_id(),
                    debug: None,
                },
            },
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.code(),
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                code = self.code(),
                status = %status.as_u16(),
                "Request rejected"
            );
        }

        let body = self.to_response();

        // The debug-enriched copy rides in the extensions; the error details
        // middleware decides whether it replaces the public body.
        let mut debug_body = body.clone();
        debug_body.error.details.debug = Some(format!("{:?}", self));

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(debug_body);
        response
    }
}

/// Malformed or mistyped JSON bodies are caller input errors
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Last-resort response for a handler that panicked
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("handler panicked");

    AppError::Internal(detail.to_string()).into_response()
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
