use axum::http::Uri;

use crate::error::AppError;

/// Any route nobody claimed
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
