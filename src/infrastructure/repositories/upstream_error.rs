use reqwest::{header::HeaderMap, StatusCode};

/// Failure of a call to the Cartesia API, classified at the repository boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpstreamError {
    /// The provider answered with a 4xx status. Never retried.
    #[error("Cartesia: {message}")]
    BadRequest {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// The provider answered with a 5xx status. `message` is always the
    /// fixed `Server error (<status>)` text; the body's own message, if any,
    /// is kept apart for pass-through routes.
    #[error("Cartesia: {message}")]
    ServerError {
        status: u16,
        message: String,
        provider_message: Option<String>,
        request_id: Option<String>,
    },

    /// No usable response (connection failure, timeout, broken body).
    #[error("Cartesia API error: {message}")]
    Unknown { message: String },
}

impl UpstreamError {
    /// Classify a non-success response.
    pub fn from_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Self {
        let request_id = extract_request_id(headers);
        let upstream_message = extract_message(body);
        let code = status.as_u16();

        if status.is_server_error() {
            UpstreamError::ServerError {
                status: code,
                message: format!("Server error ({})", code),
                provider_message: upstream_message,
                request_id,
            }
        } else {
            UpstreamError::BadRequest {
                status: code,
                message: upstream_message.unwrap_or_else(|| format!("Bad request ({})", code)),
                request_id,
            }
        }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        UpstreamError::Unknown { message }
    }

    /// Only failures caused by transient provider conditions are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, UpstreamError::BadRequest { .. })
    }

    /// Upstream status, or 500 when no response was received
    pub fn status(&self) -> u16 {
        match self {
            UpstreamError::BadRequest { status, .. } | UpstreamError::ServerError { status, .. } => {
                *status
            }
            UpstreamError::Unknown { .. } => 500,
        }
    }

    pub fn request_id(&self) -> Option<&str> {
        match self {
            UpstreamError::BadRequest { request_id, .. }
            | UpstreamError::ServerError { request_id, .. } => request_id.as_deref(),
            UpstreamError::Unknown { .. } => None,
        }
    }

    /// Message without the provider prefix, preferring what the provider said
    pub fn detail(&self) -> &str {
        match self {
            UpstreamError::ServerError {
                message,
                provider_message,
                ..
            } => provider_message.as_deref().unwrap_or(message),
            UpstreamError::BadRequest { message, .. } | UpstreamError::Unknown { message } => {
                message
            }
        }
    }
}

fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    ["request-id", "x-request-id"]
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Pull `message` (or a string `error`) out of a JSON error body.
fn extract_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}
