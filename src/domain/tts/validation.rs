use uuid::{Uuid, Variant};

use super::dto::{
    Container, OutputFormat, RawSynthesisRequest, RawVoice, Speed, SynthesisRequest, VoiceSelector,
};
use super::error::TtsServiceError;
use super::language::LanguageCode;

pub const DEFAULT_MODEL_ID: &str = "sonic-2";
pub const DEFAULT_LANGUAGE: LanguageCode = LanguageCode::Russian;
pub const DEFAULT_SPEED: Speed = Speed::Normal;
pub const DEFAULT_CONTAINER: Container = Container::Mp3;
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_MP3_BIT_RATE: u32 = 128_000;

/// Hyphenated RFC 4122 UUID, versions 1 through 5.
pub fn is_valid_voice_id(id: &str) -> bool {
    if id.len() != 36 {
        return false;
    }
    match Uuid::parse_str(id) {
        Ok(uuid) => {
            matches!(uuid.get_version_num(), 1..=5) && uuid.get_variant() == Variant::RFC4122
        }
        Err(_) => false,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SynthesisRequest {
    /// Apply defaults to a caller payload, then validate it. Every violation
    /// is reported at once, joined with "; ".
    pub fn from_raw(raw: RawSynthesisRequest) -> Result<Self, TtsServiceError> {
        let mut errors: Vec<String> = Vec::new();

        let transcript = match raw.transcript {
            None => {
                errors.push("transcript is required and must be a string".to_string());
                String::new()
            }
            Some(t) if t.trim().is_empty() => {
                errors.push("transcript cannot be empty".to_string());
                String::new()
            }
            Some(t) => t.trim().to_string(),
        };

        let voice = match raw.voice {
            Some(RawVoice {
                mode: Some(mode),
                id: Some(id),
            }) if !mode.is_empty() && !id.is_empty() => {
                if mode != "id" {
                    errors.push("voice.mode must be \"id\"".to_string());
                }
                if !is_valid_voice_id(&id) {
                    errors.push("voice.id must be a valid UUID".to_string());
                }
                Some(VoiceSelector { mode, id })
            }
            _ => {
                errors.push("voice.id and voice.mode are required".to_string());
                None
            }
        };

        let language = match non_empty(raw.language) {
            None => Some(DEFAULT_LANGUAGE),
            Some(code) => LanguageCode::from_code(&code).or_else(|| {
                errors.push(format!(
                    "language must be one of: {}",
                    LanguageCode::supported_codes()
                ));
                None
            }),
        };

        let speed = match non_empty(raw.speed) {
            None => Some(DEFAULT_SPEED),
            Some(name) => Speed::from_name(&name).or_else(|| {
                errors.push("speed must be one of: slow, normal, fast".to_string());
                None
            }),
        };

        let raw_format = raw.output_format.unwrap_or_default();
        let container = match non_empty(raw_format.container) {
            None => Some(DEFAULT_CONTAINER),
            Some(name) => Container::from_name(&name).or_else(|| {
                errors.push("output_format.container must be one of: mp3, wav, raw".to_string());
                None
            }),
        };

        let bit_rate = match (container, raw_format.bit_rate.filter(|rate| *rate > 0)) {
            (Some(Container::Mp3), None) => Some(DEFAULT_MP3_BIT_RATE),
            (_, given) => given,
        };
        let sample_rate = raw_format
            .sample_rate
            .filter(|rate| *rate > 0)
            .unwrap_or(DEFAULT_SAMPLE_RATE);

        match (voice, language, speed, container) {
            (Some(voice), Some(language), Some(speed), Some(container)) if errors.is_empty() => {
                let request = SynthesisRequest {
                    model_id: non_empty(raw.model_id)
                        .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
                    transcript,
                    voice,
                    output_format: OutputFormat {
                        container,
                        bit_rate,
                        sample_rate,
                    },
                    language,
                    speed,
                    save: raw.save.unwrap_or(true),
                    pronunciation_dict_ids: raw.pronunciation_dict_ids,
                };
                request.validate()?;
                Ok(request)
            }
            _ => Err(TtsServiceError::Invalid(errors.join("; "))),
        }
    }

    /// Invariants checked right before the provider is called.
    pub fn validate(&self) -> Result<(), TtsServiceError> {
        let mut errors: Vec<&str> = Vec::new();

        if self.transcript.trim().is_empty() {
            errors.push("transcript cannot be empty");
        }
        if self.voice.mode != "id" {
            errors.push("voice.mode must be \"id\"");
        }
        if !is_valid_voice_id(&self.voice.id) {
            errors.push("voice.id must be a valid UUID");
        }
        if self.output_format.container == Container::Mp3 && self.output_format.bit_rate.is_none()
        {
            errors.push("output_format.bit_rate is required for mp3 format");
        }
        if self.output_format.sample_rate == 0 {
            errors.push("output_format.sample_rate is required and must be a number");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TtsServiceError::Invalid(errors.join("; ")))
        }
    }
}
