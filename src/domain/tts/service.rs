use super::dto::{SynthesisRequest, SynthesisResult};
use super::error::TtsServiceError;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize a normalized request with the caller's credential
    ///
    /// This operation:
    /// - Re-checks the request invariants (nothing invalid reaches the provider)
    /// - Calls the provider through the retrying repository
    /// - Labels the audio with the MIME type of the requested container
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        bearer_token: &str,
    ) -> Result<SynthesisResult, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        bearer_token: &str,
    ) -> Result<SynthesisResult, TtsServiceError> {
        request.validate()?;

        tracing::info!(
            model_id = %request.model_id,
            voice_id = %request.voice.id,
            language = %request.language,
            speed = request.speed.as_str(),
            container = request.output_format.container.as_str(),
            transcript_length = request.transcript.len(),
            "TTS synthesis request"
        );

        let audio = self.tts_repo.synthesize(&request, bearer_token).await?;

        Ok(SynthesisResult {
            audio_data: audio.audio_data,
            content_type: request.output_format.container.content_type(),
            cartesia_file_id: audio.file_id,
        })
    }
}
