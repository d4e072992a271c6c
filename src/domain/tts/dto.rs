use serde::{Deserialize, Serialize};

use super::language::LanguageCode;

/// Body of POST /api/tts as sent by the caller. Every field is optional here;
/// defaults and validation are applied by `SynthesisRequest::from_raw`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawSynthesisRequest {
    pub model_id: Option<String>,
    pub transcript: Option<String>,
    pub voice: Option<RawVoice>,
    pub output_format: Option<RawOutputFormat>,
    pub language: Option<String>,
    pub speed: Option<String>,
    pub save: Option<bool>,
    pub pronunciation_dict_ids: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawVoice {
    pub mode: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RawOutputFormat {
    pub container: Option<String>,
    pub bit_rate: Option<u32>,
    pub sample_rate: Option<u32>,
}

/// Normalized synthesis request; serialized as-is to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub model_id: String,
    pub transcript: String,
    pub voice: VoiceSelector,
    pub output_format: OutputFormat,
    pub language: LanguageCode,
    pub speed: Speed,
    pub save: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation_dict_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSelector {
    pub mode: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFormat {
    pub container: Container,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,
    pub sample_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Speed::Slow => "slow",
            Speed::Normal => "normal",
            Speed::Fast => "fast",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|speed| speed.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Mp3,
    Wav,
    Raw,
}

impl Container {
    pub const ALL: [Container; 3] = [Container::Mp3, Container::Wav, Container::Raw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Container::Mp3 => "mp3",
            Container::Wav => "wav",
            Container::Raw => "raw",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|container| container.as_str() == name)
    }

    /// MIME type of the audio bytes returned for this container
    pub fn content_type(&self) -> &'static str {
        match self {
            Container::Mp3 => "audio/mpeg",
            Container::Wav => "audio/wav",
            Container::Raw => "application/octet-stream",
        }
    }
}

/// Audio produced by a successful synthesis call
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
    pub cartesia_file_id: Option<String>,
}
