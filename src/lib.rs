//! Music API façade library.
//!
//! Browser-facing search, playback-URL and song-detail endpoints in front of
//! a NetEase Cloud Music API gateway.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{MusicProvider, NeteaseClient};
