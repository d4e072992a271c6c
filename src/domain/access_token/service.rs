use super::dto::{
    AccessTokenRequest, AccessTokenResponse, InvalidTokenFormat, PresetTokenBody,
    TokenPermissions, TokenPreset, TokenValidation, ValidateTokenRequest,
};
use super::error::AccessTokenServiceError;
use super::validation::is_valid_token_format;
use crate::infrastructure::repositories::AccessTokenRepository;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Outcome of a token check
#[derive(Debug, Clone, PartialEq)]
pub enum TokenCheck {
    Checked(TokenValidation),
    InvalidFormat(InvalidTokenFormat),
}

pub struct AccessTokenService {
    token_repo: Arc<dyn AccessTokenRepository>,
}

impl AccessTokenService {
    pub fn new(token_repo: Arc<dyn AccessTokenRepository>) -> Self {
        Self { token_repo }
    }

    async fn issue(
        &self,
        request: &AccessTokenRequest,
        bearer_token: &str,
    ) -> Result<AccessTokenResponse, AccessTokenServiceError> {
        let issued = self.token_repo.issue(request, bearer_token).await?;

        // The provider does not echo an expiry instant
        let expires_at = Utc::now() + Duration::seconds(request.expires_in);

        let response = AccessTokenResponse {
            access_token: issued.access_token,
            token_type: issued.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_in: issued.expires_in.unwrap_or(request.expires_in),
            expires_at,
            permissions: issued.permissions.unwrap_or(request.permissions),
        };

        tracing::info!(
            tts = response.permissions.tts,
            stt = response.permissions.stt,
            expires_in = response.expires_in,
            expires_at = %response.expires_at,
            "Access token generated"
        );

        Ok(response)
    }
}

/// True when `expires_at` is in the past or cannot be parsed
pub fn is_token_expired(expires_at: &str, now: DateTime<Utc>) -> bool {
    match DateTime::parse_from_rfc3339(expires_at) {
        Ok(instant) => now >= instant.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!(error = %e, "Unparseable token expiry, treating as expired");
            true
        }
    }
}

/// Permission introspection is not available from an opaque token
pub fn extract_token_permissions(_token: &str) -> Option<TokenPermissions> {
    None
}

#[async_trait]
pub trait AccessTokenServiceApi: Send + Sync {
    /// Issue a token with caller-chosen permissions
    async fn generate(
        &self,
        request: AccessTokenRequest,
        bearer_token: &str,
    ) -> Result<AccessTokenResponse, AccessTokenServiceError>;

    /// Issue a token with one of the fixed permission sets
    async fn generate_preset(
        &self,
        preset: TokenPreset,
        body: PresetTokenBody,
        bearer_token: &str,
    ) -> Result<AccessTokenResponse, AccessTokenServiceError>;

    /// Local format and expiry check; never calls the provider
    fn validate_token(
        &self,
        request: ValidateTokenRequest,
    ) -> Result<TokenCheck, AccessTokenServiceError>;
}

#[async_trait]
impl AccessTokenServiceApi for AccessTokenService {
    async fn generate(
        &self,
        request: AccessTokenRequest,
        bearer_token: &str,
    ) -> Result<AccessTokenResponse, AccessTokenServiceError> {
        request.validate()?;
        self.issue(&request, bearer_token).await
    }

    async fn generate_preset(
        &self,
        preset: TokenPreset,
        body: PresetTokenBody,
        bearer_token: &str,
    ) -> Result<AccessTokenResponse, AccessTokenServiceError> {
        let request = AccessTokenRequest::preset(preset, &body)?;
        tracing::debug!(preset = preset.as_str(), expires_in = request.expires_in, "Preset token requested");
        self.issue(&request, bearer_token).await
    }

    fn validate_token(
        &self,
        request: ValidateTokenRequest,
    ) -> Result<TokenCheck, AccessTokenServiceError> {
        let token = request
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AccessTokenServiceError::Invalid("access_token is required in request body".to_string())
            })?;

        if !is_valid_token_format(&token) {
            return Ok(TokenCheck::InvalidFormat(InvalidTokenFormat::default()));
        }

        let now = Utc::now();
        let is_expired = request
            .expires_at
            .as_deref()
            .filter(|e| !e.is_empty())
            .map(|e| is_token_expired(e, now))
            .unwrap_or(false);

        Ok(TokenCheck::Checked(TokenValidation {
            success: true,
            valid: !is_expired,
            is_expired,
            permissions: extract_token_permissions(&token),
            checked_at: now,
        }))
    }
}
