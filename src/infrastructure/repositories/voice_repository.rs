use async_trait::async_trait;

use super::cartesia_client::{send_checked, CartesiaClient};
use super::upstream_error::UpstreamError;
use crate::domain::voice::{Voice, VoiceListQuery, VoiceListResponse};

const VOICES_PATH: &str = "/voices";

/// Read access to the provider's voice catalog. Single attempt, no retries.
#[async_trait]
pub trait VoiceRepository: Send + Sync {
    async fn list_voices(
        &self,
        query: &VoiceListQuery,
        bearer_token: &str,
    ) -> Result<VoiceListResponse, UpstreamError>;

    async fn get_voice(&self, voice_id: &str, bearer_token: &str) -> Result<Voice, UpstreamError>;
}

pub struct CartesiaVoiceRepository {
    client: CartesiaClient,
}

impl CartesiaVoiceRepository {
    pub fn new(client: CartesiaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VoiceRepository for CartesiaVoiceRepository {
    async fn list_voices(
        &self,
        query: &VoiceListQuery,
        bearer_token: &str,
    ) -> Result<VoiceListResponse, UpstreamError> {
        let params = query.to_upstream_params();
        tracing::debug!(params = ?params, "Fetching voices from Cartesia");

        let response = send_checked(self.client.get(VOICES_PATH, bearer_token).query(&params))
            .await?;

        response
            .json::<VoiceListResponse>()
            .await
            .map_err(UpstreamError::transport)
    }

    async fn get_voice(&self, voice_id: &str, bearer_token: &str) -> Result<Voice, UpstreamError> {
        let path = format!("{}/{}", VOICES_PATH, urlencoding::encode(voice_id));
        tracing::debug!(voice_id = %voice_id, "Fetching voice from Cartesia");

        let response = send_checked(self.client.get(&path, bearer_token)).await?;

        response
            .json::<Voice>()
            .await
            .map_err(UpstreamError::transport)
    }
}
