use crate::error::AppError;
use crate::infrastructure::repositories::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::Validation(msg),
            TtsServiceError::Upstream(upstream) => {
                let message = upstream.to_string();
                match upstream {
                    UpstreamError::BadRequest {
                        status, request_id, ..
                    } => AppError::UpstreamBadRequest {
                        status,
                        message,
                        request_id,
                    },
                    UpstreamError::ServerError {
                        status, request_id, ..
                    } => AppError::UpstreamServerError {
                        status,
                        message,
                        request_id,
                    },
                    UpstreamError::Unknown { .. } => AppError::UpstreamUnknown { message },
                }
            }
        }
    }
}
