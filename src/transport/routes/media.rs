use std::sync::{Arc, OnceLock};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use regex::Regex;
use tracing::info;

use crate::{
    common::{errors::ProxyError, types::MediaId},
    selector,
    server::AppState,
};

static MEDIA_ID_RE: OnceLock<Regex> = OnceLock::new();

/// Last path segment, alphanumeric, optional trailing dot-extension.
fn extract_media_id(path: &str) -> Result<MediaId, ProxyError> {
    let re = MEDIA_ID_RE.get_or_init(|| Regex::new(r"/([0-9a-zA-Z]+)(\.[^/]+)?$").unwrap());
    re.captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| MediaId::from(m.as_str()))
        .ok_or(ProxyError::MalformedRequest)
}

/// GET /{*path} — resolve the media id and serve the best rendition.
pub async fn proxy_media(
    uri: Uri,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ProxyError> {
    let media_id = extract_media_id(uri.path())?;

    let descriptor = state.api.fetch_encodings(&media_id).await?;
    let asset = selector::select_asset(&state.api, &media_id, &descriptor).await?;

    if state.config.server.redirect {
        info!("Redirecting {}: {}", media_id, asset.url);
        return redirect_to(&asset.url);
    }

    info!("Piping {}: {}", media_id, asset.url);
    pipe_rendition(&state.stream_http, &asset.url).await
}

fn redirect_to(url: &str) -> Result<Response, ProxyError> {
    let location =
        header::HeaderValue::from_str(url).map_err(|e| ProxyError::UpstreamUnavailable {
            status: None,
            body: format!("unusable download url: {}", e),
        })?;

    let mut response = StatusCode::FOUND.into_response();
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// Transparent pipe of the rendition bytes. Backpressure comes from the
/// body stream itself: the upstream read only advances as fast as the
/// inbound caller consumes, and dropping the body tears down both sides.
async fn pipe_rendition(client: &reqwest::Client, url: &str) -> Result<Response, ProxyError> {
    let upstream = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProxyError::UpstreamUnavailable {
            status: e.status().map(|s| s.as_u16()),
            body: e.to_string(),
        })?;

    let mut headers = HeaderMap::new();
    if let Some(v) = upstream.headers().get(header::CONTENT_TYPE) {
        headers.insert(header::CONTENT_TYPE, v.clone());
    }
    if let Some(v) = upstream.headers().get(header::CONTENT_LENGTH) {
        headers.insert(header::CONTENT_LENGTH, v.clone());
    }

    let status = upstream.status();
    Ok((status, headers, Body::from_stream(upstream.bytes_stream())).into_response())
}
