use super::dto::{Voice, VoiceListQuery, VoiceListResponse};
use super::error::VoiceServiceError;
use crate::infrastructure::repositories::{VoiceCache, VoiceRepository};
use async_trait::async_trait;
use std::sync::Arc;

pub struct VoiceService {
    voice_repo: Arc<dyn VoiceRepository>,
    cache: Arc<dyn VoiceCache>,
}

impl VoiceService {
    pub fn new(voice_repo: Arc<dyn VoiceRepository>, cache: Arc<dyn VoiceCache>) -> Self {
        Self { voice_repo, cache }
    }

    fn cache_key(query: &VoiceListQuery) -> String {
        let params = query
            .to_upstream_params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        format!("voices:list:{}", params)
    }
}

#[async_trait]
pub trait VoiceServiceApi: Send + Sync {
    /// List voices visible to the caller's credential
    ///
    /// The query is validated before any provider call; the provider's
    /// listing is relayed unchanged.
    async fn list_voices(
        &self,
        query: VoiceListQuery,
        bearer_token: &str,
    ) -> Result<VoiceListResponse, VoiceServiceError>;

    /// Fetch a single voice by its provider id
    async fn get_voice(&self, voice_id: &str, bearer_token: &str)
        -> Result<Voice, VoiceServiceError>;
}

#[async_trait]
impl VoiceServiceApi for VoiceService {
    async fn list_voices(
        &self,
        query: VoiceListQuery,
        bearer_token: &str,
    ) -> Result<VoiceListResponse, VoiceServiceError> {
        query.validate()?;

        let cache_key = Self::cache_key(&query);
        match self.cache.get(&cache_key).await {
            Ok(Some(cached)) => {
                tracing::debug!(cache_key = %cache_key, "Voice list served from cache");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Voice cache read failed"),
        }

        let voices = self
            .voice_repo
            .list_voices(&query, bearer_token)
            .await
            .map_err(|e| VoiceServiceError::upstream("Cartesia API error", &e))?;

        tracing::info!(
            count = voices.voices().len(),
            has_more = voices.has_more(),
            next_page = voices.next_page(),
            "Voices fetched"
        );

        if let Err(e) = self.cache.put(&cache_key, &voices).await {
            tracing::warn!(error = %e, "Voice cache write failed");
        }

        Ok(voices)
    }

    async fn get_voice(
        &self,
        voice_id: &str,
        bearer_token: &str,
    ) -> Result<Voice, VoiceServiceError> {
        if voice_id.trim().is_empty() {
            return Err(VoiceServiceError::Invalid("Voice ID is required".to_string()));
        }

        let voice = self
            .voice_repo
            .get_voice(voice_id, bearer_token)
            .await
            .map_err(|e| VoiceServiceError::upstream("Failed to fetch voice", &e))?;

        tracing::info!(voice_id = voice.id().unwrap_or(voice_id), "Voice fetched");

        Ok(voice)
    }
}
