pub mod dto;
pub mod error;
pub mod language;
pub mod service;
pub mod validation;

pub use dto::{
    Container, OutputFormat, RawOutputFormat, RawSynthesisRequest, RawVoice, Speed,
    SynthesisRequest, SynthesisResult, VoiceSelector,
};
pub use error::TtsServiceError;
pub use language::LanguageCode;
pub use service::{TtsService, TtsServiceApi};
