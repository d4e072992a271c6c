pub mod access_token;
pub mod fallback;
pub mod health;
pub mod tts;
pub mod voice;
