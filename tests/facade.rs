//! End-to-end tests: client → façade → mock gateway.

use axum::http::StatusCode;

mod common;

const EMPTY_SEARCH: &str = r#"{"code":200,"result":{"songs":[]}}"#;

#[tokio::test]
async fn test_search_relays_upstream_body() {
    let upstream = common::start_mock_upstream(|_| (200, EMPTY_SEARCH.to_string())).await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url).await;

    let res = common::http_client()
        .get(format!("http://{addr}/api/music/search?keyword=test&limit=3"))
        .send()
        .await
        .expect("façade unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), EMPTY_SEARCH);
    assert_eq!(
        upstream.requests(),
        vec!["/cloudsearch?keywords=test&type=1&limit=3&offset=0"]
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_url_and_detail_forward_ids() {
    let upstream = common::start_mock_upstream(|uri| {
        let body = if uri.path() == "/song/url" {
            r#"{"code":200,"data":[{"id":186016,"url":"http://m8.music.126.net/a.mp3","br":320000,"code":200}]}"#
        } else {
            r#"{"code":200,"songs":[],"privileges":[]}"#
        };
        (200, body.to_string())
    })
    .await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url).await;
    let client = common::http_client();

    let res = client
        .get(format!("http://{addr}/api/music/url?id=186016"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("a.mp3"));

    let res = client
        .get(format!("http://{addr}/api/music/detail?id=186016"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(
        upstream.requests(),
        vec!["/song/url?id=186016&br=320000", "/song/detail?ids=186016"]
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_id_is_rejected_without_upstream_call() {
    let upstream = common::start_mock_upstream(|_| (200, EMPTY_SEARCH.to_string())).await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url).await;

    let res = common::http_client()
        .get(format!("http://{addr}/api/music/url"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await.unwrap(), r#"{"error":"id required"}"#);
    assert!(upstream.requests().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_provider_failure_code_becomes_500() {
    let upstream = common::start_mock_upstream(|_| {
        (200, r#"{"code":-460,"message":"Cheating"}"#.to_string())
    })
    .await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url).await;

    let res = common::http_client()
        .get(format!("http://{addr}/api/music/search?keyword=test"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.text().await.unwrap();
    assert_eq!(body, r#"{"error":"search failed"}"#);
    assert!(!body.contains("Cheating"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_gateway_outage_becomes_500() {
    let upstream = common::start_mock_upstream(|_| (502, "<html>Bad Gateway</html>".into())).await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url).await;

    let res = common::http_client()
        .get(format!("http://{addr}/api/music/detail?id=1"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().await.unwrap(), r#"{"error":"get detail failed"}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn test_preflight() {
    let upstream = common::start_mock_upstream(|_| (200, EMPTY_SEARCH.to_string())).await;
    let (addr, shutdown) = common::start_facade(&upstream.base_url).await;

    let res = common::http_client()
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{addr}/api/music/search"),
        )
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-methods"], "GET, OPTIONS");
    assert_eq!(res.headers()["access-control-allow-headers"], "Content-Type");
    assert!(res.text().await.unwrap().is_empty());
    assert!(upstream.requests().is_empty());

    shutdown.trigger();
}
