use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_EXPIRES_IN_SECS: i64 = 3600;
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPermissions {
    #[serde(default)]
    pub tts: bool,
    #[serde(default)]
    pub stt: bool,
}

/// Validated token issuance request, also the body sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenRequest {
    pub permissions: TokenPermissions,
    pub expires_in: i64,
}

/// Fixed permission sets offered by the preset endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPreset {
    Tts,
    Stt,
    Full,
}

impl TokenPreset {
    pub fn permissions(&self) -> TokenPermissions {
        match self {
            TokenPreset::Tts => TokenPermissions {
                tts: true,
                stt: false,
            },
            TokenPreset::Stt => TokenPermissions {
                tts: false,
                stt: true,
            },
            TokenPreset::Full => TokenPermissions {
                tts: true,
                stt: true,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPreset::Tts => "tts",
            TokenPreset::Stt => "stt",
            TokenPreset::Full => "full",
        }
    }
}

/// Body of the preset endpoints; everything is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresetTokenBody {
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Token as answered by the provider. Older API versions call the token `token`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamAccessToken {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub permissions: Option<TokenPermissions>,
}

/// Token returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub permissions: TokenPermissions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidateTokenRequest {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Response for POST /cartesia/auth/validate-token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenValidation {
    pub success: bool,
    pub valid: bool,
    pub is_expired: bool,
    pub permissions: Option<TokenPermissions>,
    pub checked_at: DateTime<Utc>,
}

/// Response for a token that fails the format check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidTokenFormat {
    pub success: bool,
    pub valid: bool,
    pub reason: String,
}

impl Default for InvalidTokenFormat {
    fn default() -> Self {
        Self {
            success: false,
            valid: false,
            reason: "Invalid token format".to_string(),
        }
    }
}
