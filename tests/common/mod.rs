//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    http::{StatusCode, Uri},
    Router,
};
use music_api::config::{ServiceConfig, UpstreamConfig};
use music_api::{HttpServer, NeteaseClient, Shutdown};
use tokio::net::TcpListener;

/// A running mock gateway and the request URIs it has seen.
pub struct MockUpstream {
    pub base_url: String,
    seen: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Path and query of every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

/// Start a programmable mock gateway on an ephemeral port.
pub async fn start_mock_upstream<F>(respond: F) -> MockUpstream
where
    F: Fn(&Uri) -> (u16, String) + Send + Sync + 'static,
{
    start_delayed_upstream(Duration::ZERO, respond).await
}

/// Like [`start_mock_upstream`], but every response waits `delay` first.
pub async fn start_delayed_upstream<F>(delay: Duration, respond: F) -> MockUpstream
where
    F: Fn(&Uri) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let recorder = seen.clone();
    let app = Router::new().fallback(move |uri: Uri| {
        let recorder = recorder.clone();
        let respond = respond.clone();
        async move {
            recorder.lock().unwrap().push(uri.to_string());
            tokio::time::sleep(delay).await;
            let (status, body) = respond(&uri);
            (StatusCode::from_u16(status).unwrap(), body)
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream {
        base_url: format!("http://{addr}"),
        seen,
    }
}

/// Upstream config pointing at `base_url` with a short timeout.
pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        connect_timeout_secs: 1,
        request_timeout_secs: 1,
        ..UpstreamConfig::default()
    }
}

/// Start the façade against `base_url`; returns its address and shutdown handle.
#[allow(dead_code)]
pub async fn start_facade(base_url: &str) -> (SocketAddr, Shutdown) {
    let mut config = ServiceConfig::default();
    config.upstream = upstream_config(base_url);

    let provider = Arc::new(NeteaseClient::new(&config.upstream).unwrap());
    let server = HttpServer::new(config, provider).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// HTTP client that bypasses any system proxy.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
