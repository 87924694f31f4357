//! Upstream music provider subsystem.
//!
//! # Data Flow
//! ```text
//! façade handler
//!     → provider.rs (MusicProvider trait, SearchQuery)
//!     → netease.rs (HTTP call with timeouts)
//!     → UpstreamReply { code, raw body }
//!     → models.rs (typed decoding, CLI only)
//! ```
//!
//! # Design Decisions
//! - The façade depends on the trait, never on the concrete client
//! - Bodies travel as raw bytes; only the envelope code is decoded
//! - Every transport failure becomes an `UpstreamError`, never a panic

pub mod models;
pub mod netease;
pub mod provider;

pub use netease::NeteaseClient;
pub use provider::{
    MusicProvider, SearchQuery, SearchType, UpstreamError, UpstreamReply, UpstreamResult,
};
