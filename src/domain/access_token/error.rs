use crate::error::AppError;
use crate::infrastructure::repositories::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum AccessTokenServiceError {
    #[error("{0}")]
    Invalid(String),

    #[error("Cartesia Auth API error: {message}")]
    Upstream {
        status: u16,
        message: String,
        request_id: Option<String>,
    },
}

impl From<UpstreamError> for AccessTokenServiceError {
    fn from(err: UpstreamError) -> Self {
        let status = err.status();
        let message = match status {
            401 => "Invalid or expired auth token".to_string(),
            403 => "Insufficient permissions to generate access token".to_string(),
            429 => "Too many token generation requests".to_string(),
            _ => err.detail().to_string(),
        };

        AccessTokenServiceError::Upstream {
            status,
            message,
            request_id: err.request_id().map(str::to_string),
        }
    }
}

impl From<AccessTokenServiceError> for AppError {
    fn from(err: AccessTokenServiceError) -> Self {
        let message = err.to_string();
        match err {
            AccessTokenServiceError::Invalid(msg) => AppError::Validation(msg),
            AccessTokenServiceError::Upstream {
                status, request_id, ..
            } => AppError::Upstream {
                status,
                message,
                request_id,
            },
        }
    }
}
