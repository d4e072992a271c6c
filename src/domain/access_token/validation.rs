use serde_json::Value;

use super::dto::{
    AccessTokenRequest, PresetTokenBody, TokenPermissions, TokenPreset, DEFAULT_EXPIRES_IN_SECS,
    MAX_EXPIRES_IN_SECS,
};
use super::error::AccessTokenServiceError;

pub const TOKEN_MIN_LENGTH: usize = 10;
pub const TOKEN_MAX_LENGTH: usize = 500;

fn invalid(msg: &str) -> AccessTokenServiceError {
    AccessTokenServiceError::Invalid(msg.to_string())
}

/// Accepts a JSON integer or a string holding one
fn parse_expires_in(value: &Value) -> Result<i64, AccessTokenServiceError> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid("expires_in must be a valid integer"))
}

fn parse_flag(permissions: &Value, name: &str) -> Result<Option<bool>, AccessTokenServiceError> {
    match permissions.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(AccessTokenServiceError::Invalid(format!(
            "permissions.{} must be a boolean",
            name
        ))),
    }
}

impl AccessTokenRequest {
    /// Parse the body of POST /cartesia/auth/access-token
    pub fn from_json(body: &Value) -> Result<Self, AccessTokenServiceError> {
        let permissions = body
            .get("permissions")
            .filter(|p| !p.is_null())
            .ok_or_else(|| invalid("permissions field is required in request body"))?;
        let expires_in = body
            .get("expires_in")
            .filter(|e| !e.is_null())
            .ok_or_else(|| invalid("expires_in field is required in request body"))?;

        let expires_in = parse_expires_in(expires_in)?;

        if !permissions.is_object() {
            return Err(invalid("permissions object is required"));
        }
        let tts = parse_flag(permissions, "tts")?;
        let stt = parse_flag(permissions, "stt")?;

        if tts.is_none() && stt.is_none() {
            return Err(invalid(
                "At least one permission (tts or stt) must be specified",
            ));
        }

        let request = AccessTokenRequest {
            permissions: TokenPermissions {
                tts: tts.unwrap_or(false),
                stt: stt.unwrap_or(false),
            },
            expires_in,
        };
        request.validate()?;
        Ok(request)
    }

    /// Build a preset request. A missing `expires_in` means one hour.
    pub fn preset(preset: TokenPreset, body: &PresetTokenBody) -> Result<Self, AccessTokenServiceError> {
        let expires_in = body.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        if expires_in <= 0 || expires_in > MAX_EXPIRES_IN_SECS {
            return Err(invalid(
                "expires_in must be a positive integer not exceeding 3600 seconds",
            ));
        }

        Ok(AccessTokenRequest {
            permissions: preset.permissions(),
            expires_in,
        })
    }

    pub fn validate(&self) -> Result<(), AccessTokenServiceError> {
        if self.expires_in <= 0 {
            return Err(invalid("expires_in must be a positive integer"));
        }
        if self.expires_in > MAX_EXPIRES_IN_SECS {
            return Err(invalid("expires_in cannot exceed 3600 seconds (1 hour)"));
        }
        if !self.permissions.tts && !self.permissions.stt {
            return Err(invalid("At least one permission must be set to true"));
        }
        Ok(())
    }
}

/// Basic shape check; the provider remains the authority on validity
pub fn is_valid_token_format(token: &str) -> bool {
    (TOKEN_MIN_LENGTH..=TOKEN_MAX_LENGTH).contains(&token.len())
}
