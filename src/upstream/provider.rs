//! The seam between the HTTP façade and the music provider.

use std::fmt;

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

/// Errors that can occur while talking to the upstream provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Connect, transfer or whole-request deadline exceeded.
    #[error("upstream timed out")]
    Timeout,

    /// Non-success HTTP status with a body that is not a provider envelope.
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL could not be joined with an endpoint path.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Timeout => "timeout",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::InvalidUrl(_) => "invalid_url",
        }
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Raw reply from the provider.
///
/// `code` is the provider's own status (the top-level `"code"` field), which
/// is independent of the HTTP status it was delivered with.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub code: i64,
    pub body: Bytes,
}

impl UpstreamReply {
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

/// Content filter for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    Song,
    Album,
    Artist,
    Playlist,
}

impl SearchType {
    /// Numeric code the provider expects in the `type` parameter.
    pub fn code(self) -> u32 {
        match self {
            SearchType::Song => 1,
            SearchType::Album => 10,
            SearchType::Artist => 100,
            SearchType::Playlist => 1000,
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchType::Song => "song",
            SearchType::Album => "album",
            SearchType::Artist => "artist",
            SearchType::Playlist => "playlist",
        })
    }
}

/// Parameters for a search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub kind: SearchType,
    pub limit: u32,
    pub offset: u32,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Song search with default paging.
    pub fn songs(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            kind: SearchType::Song,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_kind(mut self, kind: SearchType) -> Self {
        self.kind = kind;
        self
    }
}

/// A music provider the façade can delegate to.
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Search the catalogue.
    async fn search(&self, query: &SearchQuery) -> UpstreamResult<UpstreamReply>;

    /// Resolve a playback URL for one or more comma-separated song ids.
    async fn song_url(&self, id: &str, bitrate: u32) -> UpstreamResult<UpstreamReply>;

    /// Look up details for one or more comma-separated song ids.
    async fn song_detail(&self, ids: &str) -> UpstreamResult<UpstreamReply>;
}
