pub mod dto;
pub mod error;
pub mod query;
pub mod service;

pub use dto::{ExpandField, Gender, Voice, VoiceListQuery, VoiceListResponse};
pub use error::VoiceServiceError;
pub use service::{VoiceService, VoiceServiceApi};
