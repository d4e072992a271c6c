use super::cartesia_client::{send_checked, CartesiaClient};
use super::retry::RetryPolicy;
use super::tts_repository::{SynthesizedAudio, TtsRepository};
use super::upstream_error::UpstreamError;
use crate::domain::tts::SynthesisRequest;
use async_trait::async_trait;

const TTS_BYTES_PATH: &str = "/tts/bytes";
const FILE_ID_HEADER: &str = "cartesia-file-id";

/// Cartesia `/tts/bytes` implementation of the TTS repository
pub struct CartesiaTtsRepository {
    client: CartesiaClient,
    retry_policy: RetryPolicy,
}

impl CartesiaTtsRepository {
    pub fn new(client: CartesiaClient, retry_policy: RetryPolicy) -> Self {
        Self {
            client,
            retry_policy,
        }
    }

    /// One POST to the synthesis endpoint, no retries
    async fn call_cartesia(
        &self,
        request: &SynthesisRequest,
        bearer_token: &str,
        attempt: u32,
    ) -> Result<SynthesizedAudio, UpstreamError> {
        tracing::debug!(
            attempt,
            model_id = %request.model_id,
            voice_id = %request.voice.id,
            transcript_length = request.transcript.len(),
            "Calling Cartesia TTS API"
        );

        let response = send_checked(
            self.client
                .post(TTS_BYTES_PATH, bearer_token)
                .json(request),
        )
        .await?;

        let file_id = response
            .headers()
            .get(FILE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let audio_data = response
            .bytes()
            .await
            .map_err(UpstreamError::transport)?
            .to_vec();

        Ok(SynthesizedAudio {
            audio_data,
            file_id,
        })
    }
}

#[async_trait]
impl TtsRepository for CartesiaTtsRepository {
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        bearer_token: &str,
    ) -> Result<SynthesizedAudio, UpstreamError> {
        let start_time = std::time::Instant::now();

        let result = self
            .retry_policy
            .execute(|attempt| self.call_cartesia(request, bearer_token, attempt))
            .await;

        match &result {
            Ok(audio) => tracing::info!(
                provider = "cartesia",
                container = request.output_format.container.as_str(),
                latency_ms = start_time.elapsed().as_millis() as u64,
                audio_size_bytes = audio.audio_data.len(),
                file_id = audio.file_id.as_deref().unwrap_or(""),
                "TTS synthesis completed"
            ),
            Err(err) => tracing::error!(
                provider = "cartesia",
                status = err.status(),
                request_id = err.request_id().unwrap_or(""),
                latency_ms = start_time.elapsed().as_millis() as u64,
                error = %err,
                "TTS synthesis failed"
            ),
        }

        result
    }
}
