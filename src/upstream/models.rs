use serde::Deserialize;

/// Media classes the proxy knows how to serve. Anything else is refused,
/// but must still deserialize so the raw label can be reported back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MediaType {
    Video,
    Audio,
    Unknown(String),
}

impl From<String> for MediaType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Video" => Self::Video,
            "Audio" => Self::Audio,
            _ => Self::Unknown(s),
        }
    }
}

/// One transcoded rendition of a media asset.
#[derive(Debug, Clone, Deserialize)]
pub struct Encoding {
    pub url: String,
    pub size_in_bytes: u64,
    #[serde(default)]
    pub quality_tag: Option<String>,
}

/// Wire shape of `{media id}/encodings.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaDescriptor {
    pub media_type: MediaType,
    #[serde(default)]
    pub encodings: Vec<Encoding>,
}

/// Download quality buckets, most preferred first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    Hd,
    High,
    Medium,
    Low,
}

impl QualityTier {
    /// Preference order driven by the fallback protocol.
    pub const ALL: [QualityTier; 4] = [Self::Hd, Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hd => "hd",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single download_url call.
#[derive(Debug, Clone)]
pub enum DownloadResult {
    /// Upstream handed back a usable URL for the requested tier.
    Ready(String),
    /// Upstream signalled the tier is unavailable (an `errors` payload).
    TierUnavailable(serde_json::Value),
}

/// Playable asset handed to the redirect-vs-stream decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub url: String,
}
