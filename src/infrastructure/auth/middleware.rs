use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::infrastructure::config::CARTESIA_API_VERSION;

pub const CARTESIA_VERSION_HEADER: &str = "cartesia-version";

const BEARER_PREFIX: &str = "Bearer ";

/// Caller credential injected into request extensions once the headers check out
#[derive(Clone)]
pub struct CartesiaCredentials {
    pub bearer_token: String,
}

impl std::fmt::Debug for CartesiaCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartesiaCredentials")
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Authorization header is required".to_string()))?;

    let token = auth_header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AppError::Unauthorized("Authorization header must start with \"Bearer \"".to_string())
    })?;

    if token.trim().is_empty() {
        return Err(AppError::Unauthorized(
            "Authorization token is required".to_string(),
        ));
    }

    Ok(token.to_string())
}

/// The provider version header must carry the single pinned version
pub fn validate_api_version(headers: &HeaderMap) -> Result<(), AppError> {
    let version = headers
        .get(CARTESIA_VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation("Cartesia-Version header is required".to_string()))?;

    if version != CARTESIA_API_VERSION {
        return Err(AppError::Validation(format!(
            "Invalid Cartesia-Version. Expected: {}",
            CARTESIA_API_VERSION
        )));
    }

    Ok(())
}

/// Header check for the pass-through routes: version first, then credential
pub async fn cartesia_auth_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    validate_api_version(request.headers())?;
    let bearer_token = extract_bearer_token(request.headers())?;

    request
        .extensions_mut()
        .insert(CartesiaCredentials { bearer_token });

    Ok(next.run(request).await)
}
