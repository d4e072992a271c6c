pub mod access_token_repository;
pub mod cartesia_client;
pub mod cartesia_tts_repository;
pub mod retry;
pub mod tts_repository;
pub mod upstream_error;
pub mod voice_cache;
pub mod voice_repository;

pub use access_token_repository::{AccessTokenRepository, CartesiaAccessTokenRepository};
pub use cartesia_client::CartesiaClient;
pub use cartesia_tts_repository::CartesiaTtsRepository;
pub use retry::{RetryPolicy, RetryState};
pub use tts_repository::{SynthesizedAudio, TtsRepository};
pub use upstream_error::UpstreamError;
pub use voice_cache::{NoopVoiceCache, VoiceCache};
pub use voice_repository::{CartesiaVoiceRepository, VoiceRepository};
