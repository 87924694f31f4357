//! HTTP façade subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, tracing)
//!     → cors.rs (preflight short-circuit, CORS headers)
//!     → params.rs (query validation)
//!     → handlers.rs (one provider call, relay or generic failure)
//!     → Send to client
//! ```

pub mod cors;
pub mod error;
pub mod handlers;
pub mod params;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer, ServerError};
