pub mod access_token;
pub mod shared;
pub mod tts;
pub mod voice;
