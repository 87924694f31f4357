//! HTTP client for a NetEase Cloud Music API gateway.
//!
//! # Responsibilities
//! - Map façade operations onto gateway routes
//! - Enforce connect and request timeouts on every call
//! - Extract the provider status code from the response envelope
//! - Offer typed decoding for callers that read the data
//!
//! # Routes
//! ```text
//! search  → GET {base}/cloudsearch?keywords=&type=&limit=&offset=
//! url     → GET {base}/song/url?id=&br=
//! detail  → GET {base}/song/detail?ids=
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::models::{Envelope, SearchResponse, SongDetailResponse, SongUrlResponse};
use crate::upstream::provider::{
    MusicProvider, SearchQuery, UpstreamError, UpstreamReply, UpstreamResult,
};

const SEARCH_PATH: &str = "cloudsearch";
const SONG_URL_PATH: &str = "song/url";
const SONG_DETAIL_PATH: &str = "song/detail";

/// Gateway-backed music provider.
#[derive(Debug, Clone)]
pub struct NeteaseClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NeteaseClient {
    /// Create a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut base_url = Url::parse(&config.base_url)?;
        // Url::join drops the last segment unless the path ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        tracing::debug!(base_url = %base_url, "Upstream client initialized");

        Ok(Self { http, base_url })
    }

    /// Search and decode the song list.
    pub async fn search_songs(&self, query: &SearchQuery) -> UpstreamResult<SearchResponse> {
        decode(&self.search(query).await?)
    }

    /// Resolve and decode playback URLs.
    pub async fn song_urls(&self, id: &str, bitrate: u32) -> UpstreamResult<SongUrlResponse> {
        decode(&self.song_url(id, bitrate).await?)
    }

    /// Look up and decode song details.
    pub async fn song_details(&self, ids: &str) -> UpstreamResult<SongDetailResponse> {
        decode(&self.song_detail(ids).await?)
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> UpstreamResult<UpstreamReply> {
        let url = self.base_url.join(path)?;

        tracing::debug!(url = %url, "Calling upstream");

        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(map_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_error)?;

        match serde_json::from_slice::<Envelope>(&body) {
            Ok(envelope) => Ok(UpstreamReply {
                code: envelope.code,
                body,
            }),
            Err(_) if !status.is_success() => Err(UpstreamError::Status(status.as_u16())),
            Err(e) => Err(UpstreamError::Decode(e)),
        }
    }
}

fn map_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(e.to_string())
    }
}

#[async_trait]
impl MusicProvider for NeteaseClient {
    async fn search(&self, query: &SearchQuery) -> UpstreamResult<UpstreamReply> {
        self.get(
            SEARCH_PATH,
            &[
                ("keywords", query.keyword.clone()),
                ("type", query.kind.code().to_string()),
                ("limit", query.limit.to_string()),
                ("offset", query.offset.to_string()),
            ],
        )
        .await
    }

    async fn song_url(&self, id: &str, bitrate: u32) -> UpstreamResult<UpstreamReply> {
        self.get(
            SONG_URL_PATH,
            &[("id", id.to_string()), ("br", bitrate.to_string())],
        )
        .await
    }

    async fn song_detail(&self, ids: &str) -> UpstreamResult<UpstreamReply> {
        self.get(SONG_DETAIL_PATH, &[("ids", ids.to_string())]).await
    }
}

/// Decode a reply body into a typed response.
pub fn decode<T: DeserializeOwned>(reply: &UpstreamReply) -> UpstreamResult<T> {
    Ok(serde_json::from_slice(&reply.body)?)
}
