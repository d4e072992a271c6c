use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;

use super::upstream_error::UpstreamError;

/// Raw output of the provider's synthesis endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub audio_data: Vec<u8>,
    /// Identifier of the stored file when the provider saved the output
    pub file_id: Option<String>,
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying provider call so services can be tested without a network.
///
/// Implementations are responsible for:
/// - Attaching the provider credential and version headers
/// - Retrying transient failures
/// - Classifying failures into `UpstreamError`
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a normalized request using the caller's bearer credential
    ///
    /// # Errors
    /// `BadRequest` for 4xx answers, `ServerError` once retries are exhausted
    /// on 5xx answers, `Unknown` when no response was received
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        bearer_token: &str,
    ) -> Result<SynthesizedAudio, UpstreamError>;
}
