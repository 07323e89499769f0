use crate::common::http::HttpClient;
use crate::common::types::AnyResult;
use crate::configs::Config;
use crate::upstream::MediaApiClient;

/// Top-level application state. Built once at startup, read-only after
/// that; request handlers share it through an `Arc`.
pub struct AppState {
    pub config: Config,
    pub api: MediaApiClient,
    /// Separate client for piping rendition bytes, so API-call deadlines
    /// never cut a long-running stream short.
    pub stream_http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> AnyResult<Self> {
        let api = MediaApiClient::new(HttpClient::new()?, &config.upstream);
        let stream_http = HttpClient::new_streaming()?;
        Ok(Self {
            config,
            api,
            stream_http,
        })
    }
}
