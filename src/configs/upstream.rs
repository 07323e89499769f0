use serde::{Deserialize, Serialize};

const DEFAULT_API_ROOT: &str = "http://api.video.limelight.com/rest/organizations";

/// Credentials and addressing for the third-party media API.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UpstreamConfig {
    pub access_key: String,
    pub secret: String,
    pub organization: String,
    /// Override for the API root, mainly for pointing at a local stand-in.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl UpstreamConfig {
    /// Root for media endpoints: `{root}/{organization}/media`.
    pub fn media_base(&self) -> String {
        let root = self.base_url.as_deref().unwrap_or(DEFAULT_API_ROOT);
        format!("{}/{}/media", root.trim_end_matches('/'), self.organization)
    }
}
