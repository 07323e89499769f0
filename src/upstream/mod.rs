pub mod client;
pub mod models;

pub use client::MediaApiClient;
pub use models::*;

use async_trait::async_trait;

use crate::common::errors::ProxyError;
use crate::common::types::MediaId;

/// Seam between the selector's fallback loop and the signed download_url
/// call, so the loop can be exercised without a live media API.
#[async_trait]
pub trait DownloadResolver: Send + Sync {
    /// One round trip against `{base}/{media id}/download_url` for a tier.
    /// Retry and fallback policy lives with the caller, not here.
    async fn request_download_url(
        &self,
        media_id: &MediaId,
        tier: QualityTier,
    ) -> Result<DownloadResult, ProxyError>;
}
