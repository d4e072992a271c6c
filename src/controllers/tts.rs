use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::tts::{RawSynthesisRequest, SynthesisRequest, TtsService, TtsServiceApi},
    error::{AppError, AppResult},
    infrastructure::auth::extract_bearer_token,
};

pub const X_CARTESIA_FILE_ID: &str = "x-cartesia-file-id";

pub struct TtsController {
    tts_service: Arc<TtsService>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/tts - Convert text to speech, answering with raw audio bytes
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        headers: HeaderMap,
        payload: Result<Json<RawSynthesisRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let Json(raw) = payload?;

        // Body problems are reported before credential problems
        let request = SynthesisRequest::from_raw(raw)?;
        let bearer_token = extract_bearer_token(&headers)
            .map_err(|_| AppError::Unauthorized("Bearer token is required".to_string()))?;

        let result = controller
            .tts_service
            .synthesize(request, &bearer_token)
            .await?;

        let mut response_headers = HeaderMap::new();
        response_headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(result.content_type),
        );
        response_headers.insert(
            header::CONTENT_LENGTH,
            HeaderValue::from(result.audio_data.len()),
        );
        if let Some(file_id) = result
            .cartesia_file_id
            .as_deref()
            .and_then(|id| HeaderValue::from_str(id).ok())
        {
            response_headers.insert(X_CARTESIA_FILE_ID, file_id);
        }

        Ok((StatusCode::OK, response_headers, Body::from(result.audio_data)))
    }
}
