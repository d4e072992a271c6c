use async_trait::async_trait;

use crate::domain::voice::VoiceListResponse;

/// Storage for voice listings keyed by their normalized query.
///
/// Callers treat every error as a miss; a failing cache never fails a request.
#[async_trait]
pub trait VoiceCache: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<VoiceListResponse>>;

    async fn put(&self, key: &str, value: &VoiceListResponse) -> anyhow::Result<()>;
}

/// Cache that stores nothing. Every lookup is a miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVoiceCache;

#[async_trait]
impl VoiceCache for NoopVoiceCache {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<VoiceListResponse>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &VoiceListResponse) -> anyhow::Result<()> {
        Ok(())
    }
}
