use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Terminal per-request failures. None of these take the listener down;
/// each turns into a status code and a plain-text body.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The request path carries no extractable media id.
    #[error("no media id in request path")]
    MalformedRequest,

    /// Transport failure or non-success response from the media API.
    /// The upstream status is mirrored verbatim when one was received.
    #[error("upstream unavailable (status {status:?}): {body}")]
    UpstreamUnavailable { status: Option<u16>, body: String },

    /// The descriptor's media type is neither Video nor Audio.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Every quality tier was exhausted, or an audio asset had no encodings.
    #[error("no downloadable asset")]
    AssetNotFound,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::UnsupportedMediaType(_) => StatusCode::BAD_REQUEST,
            Self::AssetNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::MalformedRequest => "Media Not Found".to_string(),
            // Raw upstream body passed through for diagnostics.
            Self::UpstreamUnavailable { body, .. } => body,
            Self::UnsupportedMediaType(_) => "Unknown media type.".to_string(),
            Self::AssetNotFound => "Media download not available".to_string(),
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_mirrored_when_present() {
        let err = ProxyError::UpstreamUnavailable {
            status: Some(403),
            body: "denied".to_string(),
        };
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn upstream_without_status_maps_to_500() {
        let err = ProxyError::UpstreamUnavailable {
            status: None,
            body: "connection refused".to_string(),
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn terminal_errors_map_to_expected_codes() {
        assert_eq!(ProxyError::MalformedRequest.status(), StatusCode::NOT_FOUND);
        assert_eq!(ProxyError::AssetNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ProxyError::UnsupportedMediaType("Image".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
