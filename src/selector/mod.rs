//! Rendition selection and the quality-tier fallback protocol.

use tracing::{debug, info};

use crate::common::errors::ProxyError;
use crate::common::types::MediaId;
use crate::upstream::{
    DownloadResolver, DownloadResult, Encoding, MediaDescriptor, MediaType, QualityTier,
    ResolvedAsset,
};

/// Largest rendition by byte size. Ties keep the first encoding seen —
/// a determinism choice on our side, not an ordering the upstream
/// guarantees.
pub fn largest_encoding(encodings: &[Encoding]) -> Option<&Encoding> {
    let mut largest: Option<&Encoding> = None;
    for encoding in encodings {
        match largest {
            Some(current) if encoding.size_in_bytes <= current.size_in_bytes => {}
            _ => largest = Some(encoding),
        }
    }
    largest
}

/// Pick the best playable asset for a descriptor.
///
/// Audio links directly to its largest encoding. Video goes through the
/// download_url fallback across quality tiers. Anything else is refused.
pub async fn select_asset(
    resolver: &dyn DownloadResolver,
    media_id: &MediaId,
    descriptor: &MediaDescriptor,
) -> Result<ResolvedAsset, ProxyError> {
    match &descriptor.media_type {
        MediaType::Audio => {
            let largest =
                largest_encoding(&descriptor.encodings).ok_or(ProxyError::AssetNotFound)?;
            Ok(ResolvedAsset {
                url: largest.url.clone(),
            })
        }
        MediaType::Video => best_download(resolver, media_id).await,
        MediaType::Unknown(label) => Err(ProxyError::UnsupportedMediaType(label.clone())),
    }
}

/// Walk the tiers most-preferred first, stopping at the first usable URL.
///
/// Sequential on purpose: every attempt is a metered upstream call and the
/// tiers form a strict preference order, so racing them would waste calls
/// and muddy first-success-wins.
async fn best_download(
    resolver: &dyn DownloadResolver,
    media_id: &MediaId,
) -> Result<ResolvedAsset, ProxyError> {
    for tier in QualityTier::ALL {
        match resolver.request_download_url(media_id, tier).await? {
            DownloadResult::Ready(url) => {
                debug!("Resolved {} at tier {}", media_id, tier);
                return Ok(ResolvedAsset { url });
            }
            DownloadResult::TierUnavailable(_) => {
                debug!("Tier {} unavailable for {}", tier, media_id);
            }
        }
    }

    info!("Media download not found for {}", media_id);
    Err(ProxyError::AssetNotFound)
}
