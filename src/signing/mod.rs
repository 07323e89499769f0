//! HMAC request signing for the upstream media API.
//!
//! Every outbound call carries a deterministic query string whose trailing
//! `signature` parameter is an HMAC-SHA256 over the verb, host, path and
//! the raw parameter values. The upstream re-derives the same string, so
//! the parameter order used for signing and for the emitted query must be
//! identical (ascending key order).

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::common::types::AnyResult;
use crate::configs::UpstreamConfig;

/// Verbs the media API accepts for signed calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    Get,
    Post,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Seconds a signature stays valid when the caller does not pin `expires`.
const EXPIRY_WINDOW_SECS: u64 = 300;

pub struct Signer {
    access_key: String,
    secret: String,
}

impl Signer {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            access_key: config.access_key.clone(),
            secret: config.secret.clone(),
        }
    }

    /// Produce `resource_url` with a signed query string appended.
    ///
    /// `expires` defaults to now + 300s unless present in `params`, and
    /// `access_key` is always injected before signing. The string-to-sign
    /// uses raw parameter values; only the emitted query is percent-encoded.
    pub fn sign(
        &self,
        verb: HttpVerb,
        resource_url: &str,
        mut params: BTreeMap<String, String>,
    ) -> AnyResult<String> {
        params
            .entry("expires".to_string())
            .or_insert_with(|| (unix_now() + EXPIRY_WINDOW_SECS).to_string());
        params.insert("access_key".to_string(), self.access_key.clone());

        let url = reqwest::Url::parse(resource_url)?;
        let host = url.host_str().ok_or("resource url has no host")?;

        let mut to_sign = format!("{}|{}|{}|", verb.as_str(), host, url.path()).to_lowercase();
        let raw_pairs: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        to_sign.push_str(&raw_pairs.join("&"));

        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(to_sign.as_bytes());
        let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        let mut query: Vec<String> = params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();
        query.push(format!("signature={}", urlencoding::encode(&signature)));

        Ok(format!("{}?{}", resource_url, query.join("&")))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
