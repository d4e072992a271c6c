use crate::error::AppError;
use crate::infrastructure::repositories::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum VoiceServiceError {
    #[error("{0}")]
    Invalid(String),

    /// Provider failure relayed with its own status
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        request_id: Option<String>,
    },
}

impl VoiceServiceError {
    /// Wrap a provider failure, prefixing its detail with `context`
    pub fn upstream(context: &str, err: &UpstreamError) -> Self {
        VoiceServiceError::Upstream {
            status: err.status(),
            message: format!("{}: {}", context, err.detail()),
            request_id: err.request_id().map(str::to_string),
        }
    }
}

impl From<VoiceServiceError> for AppError {
    fn from(err: VoiceServiceError) -> Self {
        match err {
            VoiceServiceError::Invalid(msg) => AppError::Validation(msg),
            VoiceServiceError::Upstream {
                status,
                message,
                request_id,
            } => AppError::Upstream {
                status,
                message,
                request_id,
            },
        }
    }
}
