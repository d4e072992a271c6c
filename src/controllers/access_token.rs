use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::{
        access_token::{
            AccessTokenRequest, AccessTokenResponse, AccessTokenService, AccessTokenServiceApi,
            PresetTokenBody, TokenCheck, TokenPreset, ValidateTokenRequest,
        },
        shared::DataResponse,
    },
    error::{AppError, AppResult},
    infrastructure::auth::CartesiaCredentials,
};

pub struct AccessTokenController {
    token_service: Arc<AccessTokenService>,
}

type Created = (StatusCode, Json<DataResponse<AccessTokenResponse>>);

impl AccessTokenController {
    pub fn new(token_service: Arc<AccessTokenService>) -> Self {
        Self { token_service }
    }

    /// POST /cartesia/auth/access-token - Issue a token with explicit permissions
    pub async fn generate(
        State(controller): State<Arc<AccessTokenController>>,
        Extension(credentials): Extension<CartesiaCredentials>,
        payload: Result<Json<Value>, JsonRejection>,
    ) -> AppResult<Created> {
        let Json(body) = payload?;
        let request = AccessTokenRequest::from_json(&body)?;

        let token = controller
            .token_service
            .generate(request, &credentials.bearer_token)
            .await?;

        Ok((StatusCode::CREATED, Json(DataResponse::new(token))))
    }

    /// POST /cartesia/auth/access-token/tts
    pub async fn generate_tts(
        State(controller): State<Arc<AccessTokenController>>,
        Extension(credentials): Extension<CartesiaCredentials>,
        body: Result<Bytes, BytesRejection>,
    ) -> AppResult<Created> {
        let body = body?;
        controller
            .generate_preset(TokenPreset::Tts, &credentials, &body)
            .await
    }

    /// POST /cartesia/auth/access-token/stt
    pub async fn generate_stt(
        State(controller): State<Arc<AccessTokenController>>,
        Extension(credentials): Extension<CartesiaCredentials>,
        body: Result<Bytes, BytesRejection>,
    ) -> AppResult<Created> {
        let body = body?;
        controller
            .generate_preset(TokenPreset::Stt, &credentials, &body)
            .await
    }

    /// POST /cartesia/auth/access-token/full
    pub async fn generate_full(
        State(controller): State<Arc<AccessTokenController>>,
        Extension(credentials): Extension<CartesiaCredentials>,
        body: Result<Bytes, BytesRejection>,
    ) -> AppResult<Created> {
        let body = body?;
        controller
            .generate_preset(TokenPreset::Full, &credentials, &body)
            .await
    }

    /// POST /cartesia/auth/validate-token - Local format and expiry check
    pub async fn validate_token(
        State(controller): State<Arc<AccessTokenController>>,
        payload: Result<Json<ValidateTokenRequest>, JsonRejection>,
    ) -> AppResult<Response> {
        let Json(request) = payload?;

        let response = match controller.token_service.validate_token(request)? {
            TokenCheck::Checked(check) => (StatusCode::OK, Json(check)).into_response(),
            TokenCheck::InvalidFormat(rejection) => {
                (StatusCode::BAD_REQUEST, Json(rejection)).into_response()
            }
        };
        Ok(response)
    }

    async fn generate_preset(
        &self,
        preset: TokenPreset,
        credentials: &CartesiaCredentials,
        body: &[u8],
    ) -> AppResult<Created> {
        let body = parse_preset_body(body)?;

        let token = self
            .token_service
            .generate_preset(preset, body, &credentials.bearer_token)
            .await?;

        Ok((StatusCode::CREATED, Json(DataResponse::new(token))))
    }
}

/// The preset body is optional; an empty body means defaults
fn parse_preset_body(body: &[u8]) -> Result<PresetTokenBody, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PresetTokenBody::default());
    }

    serde_json::from_slice(body).map_err(|_| {
        AppError::Validation(
            "expires_in must be a positive integer not exceeding 3600 seconds".to_string(),
        )
    })
}
