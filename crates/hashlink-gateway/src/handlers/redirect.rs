use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use hashlink_core::ShortCode;
use tracing::debug;

/// `GET /{code}`: 302 to the long URL, or 404.
///
/// A path that cannot be a short code is answered with 404 without
/// touching either store.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Response> {
    let Ok(code) = ShortCode::parse(raw.trim_start_matches('/')) else {
        debug!(path = %raw, "Path is not a short code");
        return Err(AppError::NotFound);
    };

    let long_url = state
        .coordinator()
        .lookup(&code)
        .await
        .map_err(AppError::Resolve)?
        .ok_or(AppError::NotFound)?;

    let location = HeaderValue::try_from(long_url.as_str())
        .map_err(|e| AppError::InvalidLocation(e.to_string()))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
