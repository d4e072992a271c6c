use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    domain::voice::{Voice, VoiceListQuery, VoiceListResponse, VoiceService, VoiceServiceApi},
    error::AppResult,
    infrastructure::auth::CartesiaCredentials,
};

pub struct VoiceController {
    voice_service: Arc<VoiceService>,
}

impl VoiceController {
    pub fn new(voice_service: Arc<VoiceService>) -> Self {
        Self { voice_service }
    }

    /// GET /cartesia/voices - List voices, relaying the provider's page as-is
    pub async fn list_voices(
        State(controller): State<Arc<VoiceController>>,
        Extension(credentials): Extension<CartesiaCredentials>,
        Query(params): Query<Vec<(String, String)>>,
    ) -> AppResult<Json<VoiceListResponse>> {
        let query = VoiceListQuery::from_pairs(&params)?;
        let voices = controller
            .voice_service
            .list_voices(query, &credentials.bearer_token)
            .await?;
        Ok(Json(voices))
    }

    /// GET /cartesia/voices/:id - Fetch one voice
    pub async fn get_voice(
        State(controller): State<Arc<VoiceController>>,
        Extension(credentials): Extension<CartesiaCredentials>,
        Path(voice_id): Path<String>,
    ) -> AppResult<Json<Voice>> {
        let voice = controller
            .voice_service
            .get_voice(&voice_id, &credentials.bearer_token)
            .await?;
        Ok(Json(voice))
    }
}
