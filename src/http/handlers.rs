//! Façade endpoints.
//!
//! Each handler validates its query, makes one provider call bounded by the
//! request deadline and relays the provider body byte-for-byte when the
//! provider code is 200.

use std::future::Future;
use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::error::ApiError;
use crate::http::params::{IdParams, SearchParams, PLAYBACK_BITRATE};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::{UpstreamError, UpstreamReply, UpstreamResult};

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Search,
    SongUrl,
    SongDetail,
}

impl Endpoint {
    fn name(self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::SongUrl => "url",
            Endpoint::SongDetail => "detail",
        }
    }

    /// Operation name used in the client-facing failure message.
    fn operation(self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::SongUrl => "get url",
            Endpoint::SongDetail => "get detail",
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = match pairs(query).and_then(|p| SearchParams::from_pairs(&p).into_query()) {
        Ok(query) => {
            tracing::debug!(
                request_id = %request_id(&headers),
                keyword = %query.keyword,
                limit = query.limit,
                "Searching"
            );
            let outcome = within_deadline(&state, state.provider.search(&query)).await;
            relay(Endpoint::Search, &headers, outcome)
        }
        Err(e) => Err(e),
    };
    respond(Endpoint::Search, start, result)
}

pub async fn song_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = match pairs(query).and_then(|p| IdParams::from_pairs(&p).require_id()) {
        Ok(id) => {
            let outcome =
                within_deadline(&state, state.provider.song_url(&id, PLAYBACK_BITRATE)).await;
            relay(Endpoint::SongUrl, &headers, outcome)
        }
        Err(e) => Err(e),
    };
    respond(Endpoint::SongUrl, start, result)
}

pub async fn song_detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let start = Instant::now();
    let result = match pairs(query).and_then(|p| IdParams::from_pairs(&p).require_ids()) {
        Ok(ids) => {
            let outcome = within_deadline(&state, state.provider.song_detail(&ids)).await;
            relay(Endpoint::SongDetail, &headers, outcome)
        }
        Err(e) => Err(e),
    };
    respond(Endpoint::SongDetail, start, result)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn pairs(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Vec<(String, String)>, ApiError> {
    match query {
        Ok(Query(pairs)) => Ok(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected query string");
            Err(ApiError::invalid("query"))
        }
    }
}

async fn within_deadline<F>(state: &AppState, call: F) -> UpstreamResult<UpstreamReply>
where
    F: Future<Output = UpstreamResult<UpstreamReply>>,
{
    tokio::time::timeout(state.deadline, call)
        .await
        .unwrap_or_else(|_| Err(UpstreamError::Timeout))
}

/// Turn a provider outcome into the relayed body or a generic failure.
fn relay(
    endpoint: Endpoint,
    headers: &HeaderMap,
    outcome: UpstreamResult<UpstreamReply>,
) -> Result<Response, ApiError> {
    let request_id = request_id(headers);
    match outcome {
        Ok(reply) if reply.is_ok() => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            reply.body,
        )
            .into_response()),
        Ok(reply) => {
            tracing::warn!(
                request_id = %request_id,
                endpoint = endpoint.name(),
                code = reply.code,
                "Upstream reported failure"
            );
            metrics::record_upstream_error(endpoint.name(), "code");
            Err(ApiError::Upstream {
                operation: endpoint.operation(),
            })
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                endpoint = endpoint.name(),
                error = %e,
                "Upstream error"
            );
            metrics::record_upstream_error(endpoint.name(), e.kind());
            Err(ApiError::Upstream {
                operation: endpoint.operation(),
            })
        }
    }
}

fn respond(endpoint: Endpoint, start: Instant, result: Result<Response, ApiError>) -> Response {
    let response = result.unwrap_or_else(IntoResponse::into_response);
    metrics::record_request(endpoint.name(), response.status().as_u16(), start);
    response
}

fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
