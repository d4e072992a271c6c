use axum::{
    body::Body,
    extract::{Request, State},
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::shared::ErrorResponse;
use crate::infrastructure::config::Config;

/// Outside production, swap error bodies for their debug-enriched copy.
/// The copy is always removed from the extensions before the response leaves.
pub async fn error_details_middleware(
    State(config): State<Arc<Config>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(debug_body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };
    if config.is_production() {
        return response;
    }

    match serde_json::to_vec(&debug_body) {
        Ok(bytes) => {
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize debug error body");
            response
        }
    }
}
