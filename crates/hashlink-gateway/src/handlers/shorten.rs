use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use tracing::debug;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// `POST /shorten`: maps `long_url` to a short URL on this host.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>> {
    let Json(request) = body.map_err(|rejection| {
        debug!(error = %rejection, "Rejected shorten body");
        AppError::InvalidRequest("Invalid JSON request".to_string())
    })?;

    validate_long_url(&request.long_url)?;
    let base_url = base_url(&headers)?;

    let code = state
        .coordinator()
        .resolve_or_create(&request.long_url)
        .await
        .map_err(AppError::Shorten)?;

    Ok(Json(ShortenResponse {
        short_url: code.to_url(&base_url),
        long_url: request.long_url,
    }))
}

/// Validates that the URL has a valid format (http or https scheme and a host).
fn validate_long_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(AppError::InvalidRequest(
            "URL cannot be empty".to_string(),
        ));
    }

    if url.chars().any(char::is_control) {
        return Err(AppError::InvalidRequest(
            "URL must not contain control characters".to_string(),
        ));
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return Err(AppError::InvalidRequest(format!(
            "URL must have a valid scheme and host: {}",
            url
        )));
    };

    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(AppError::InvalidRequest(format!(
            "URL scheme must be http or https: {}",
            scheme
        )));
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err(AppError::InvalidRequest(format!(
            "URL must have a valid scheme and host: {}",
            url
        )));
    }

    Ok(())
}

/// `<scheme>://<host>` of the incoming request.
///
/// The scheme honours `X-Forwarded-Proto` and defaults to `http`.
fn base_url(headers: &HeaderMap) -> Result<String> {
    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http");

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("missing Host header".to_string()))?;

    Ok(format!("{scheme}://{host}"))
}
