use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::DownloadResolver;
use super::models::{DownloadResult, MediaDescriptor, QualityTier};
use crate::common::errors::ProxyError;
use crate::common::types::MediaId;
use crate::configs::UpstreamConfig;
use crate::signing::{HttpVerb, Signer};

/// Signed client for the third-party media API. One network round trip per
/// call; quality fallback lives in the selector.
pub struct MediaApiClient {
    http: reqwest::Client,
    signer: Signer,
    base: String,
}

impl MediaApiClient {
    pub fn new(http: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            http,
            signer: Signer::new(config),
            base: config.media_base(),
        }
    }

    /// Signed GET of `{base}/{media id}/encodings.json`.
    pub async fn fetch_encodings(&self, media_id: &MediaId) -> Result<MediaDescriptor, ProxyError> {
        let url = format!("{}/{}/encodings.json", self.base, media_id);
        let signed = self.sign(HttpVerb::Get, &url)?;

        let response = self.http.get(&signed).send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("Encodings fetch for {} failed with {}", media_id, status);
            return Err(ProxyError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ProxyError::UpstreamUnavailable {
            status: None,
            body: format!("malformed encodings payload: {}", e),
        })
    }

    fn sign(&self, verb: HttpVerb, url: &str) -> Result<String, ProxyError> {
        self.signer
            .sign(verb, url, BTreeMap::new())
            .map_err(|e| ProxyError::UpstreamUnavailable {
                status: None,
                body: e.to_string(),
            })
    }
}

#[async_trait]
impl DownloadResolver for MediaApiClient {
    /// Signed POST of `{base}/{media id}/download_url` with `quality=<tier>`.
    async fn request_download_url(
        &self,
        media_id: &MediaId,
        tier: QualityTier,
    ) -> Result<DownloadResult, ProxyError> {
        let url = format!("{}/{}/download_url", self.base, media_id);
        let signed = self.sign(HttpVerb::Post, &url)?;

        let response = self
            .http
            .post(&signed)
            .form(&[("quality", tier.as_str())])
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        debug!("download_url for {} at tier {}: {}", media_id, tier, status);
        interpret_download_body(status, body)
    }
}

fn transport_error(err: reqwest::Error) -> ProxyError {
    ProxyError::UpstreamUnavailable {
        status: err.status().map(|s| s.as_u16()),
        body: err.to_string(),
    }
}

/// The upstream signals tier unavailability with an `errors` payload (any
/// status); a successful resolution is either a JSON string or a bare URL.
fn interpret_download_body(
    status: reqwest::StatusCode,
    body: String,
) -> Result<DownloadResult, ProxyError> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        if value.get("errors").is_some() {
            return Ok(DownloadResult::TierUnavailable(value));
        }
        if let Some(url) = value.as_str() {
            return Ok(DownloadResult::Ready(url.to_string()));
        }
    }

    if !status.is_success() {
        return Err(ProxyError::UpstreamUnavailable {
            status: Some(status.as_u16()),
            body,
        });
    }

    Ok(DownloadResult::Ready(body.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn errors_payload_means_tier_unavailable() {
        let result = interpret_download_body(
            StatusCode::OK,
            r#"{"errors": ["no rendition at this quality"]}"#.to_string(),
        )
        .unwrap();
        assert!(matches!(result, DownloadResult::TierUnavailable(_)));
    }

    #[test]
    fn errors_payload_wins_over_status() {
        let result = interpret_download_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors": []}"#.to_string(),
        )
        .unwrap();
        assert!(matches!(result, DownloadResult::TierUnavailable(_)));
    }

    #[test]
    fn json_string_body_is_ready() {
        let result = interpret_download_body(
            StatusCode::OK,
            r#""https://cdn/high.mp4""#.to_string(),
        )
        .unwrap();
        match result {
            DownloadResult::Ready(url) => assert_eq!(url, "https://cdn/high.mp4"),
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn bare_url_body_is_ready() {
        let result =
            interpret_download_body(StatusCode::OK, "https://cdn/high.mp4\n".to_string()).unwrap();
        match result {
            DownloadResult::Ready(url) => assert_eq!(url, "https://cdn/high.mp4"),
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn non_success_without_errors_field_is_terminal() {
        let err = interpret_download_body(StatusCode::BAD_GATEWAY, "gateway down".to_string())
            .unwrap_err();
        match err {
            ProxyError::UpstreamUnavailable { status, body } => {
                assert_eq!(status, Some(502));
                assert_eq!(body, "gateway down");
            }
            other => panic!("expected UpstreamUnavailable, got {:?}", other),
        }
    }
}
