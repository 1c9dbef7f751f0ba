mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use short_url_service::api::handlers::shorten_handler;
use short_url_service::domain::repositories::MappingRepository;
use short_url_service::state::AppState;
use std::sync::Arc;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorturl", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_fresh_store_starts_at_one() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://example.com")])
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "original_url": "https://example.com",
        "short_url": 1
    }));
}

#[tokio::test]
async fn test_shorten_same_url_twice_gets_new_code() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let first = server
        .post("/api/shorturl")
        .form(&[("url", "https://example.com")])
        .await;
    let second = server
        .post("/api/shorturl")
        .form(&[("url", "https://example.com")])
        .await;

    assert_eq!(first.json::<serde_json::Value>()["short_url"], 1);
    assert_eq!(second.json::<serde_json::Value>()["short_url"], 2);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_shorten_keeps_url_verbatim() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    let url = "https://Example.COM:443/Path?q=Rust&lang=en#Section";
    let response = server.post("/api/shorturl").form(&[("url", url)]).await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["original_url"], url);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "not a url")])
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "error": "invalid url" }));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_unresolvable_host() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "http://thisdomaindoesnotexist.invalid")])
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "error": "invalid url" }));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_non_web_scheme() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "ftp:/john-doe.invalidTLD")])
        .await;

    response.assert_json(&json!({ "error": "invalid url" }));
}

#[tokio::test]
async fn test_shorten_missing_field() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorturl")
        .form(&[("link", "https://example.com")])
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "error": "invalid url" }));
}

#[tokio::test]
async fn test_shorten_oversized_url() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    let url = format!("https://example.com/{}", "a".repeat(4096));
    let response = server
        .post("/api/shorturl")
        .form(&[("url", url.as_str())])
        .await;

    response.assert_json(&json!({ "error": "invalid url" }));
}

#[tokio::test]
async fn test_rejection_does_not_consume_code() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    server
        .post("/api/shorturl")
        .form(&[("url", "not a url")])
        .await;
    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://example.com")])
        .await;

    assert_eq!(response.json::<serde_json::Value>()["short_url"], 1);
}

#[tokio::test]
async fn test_store_failure_returns_500_and_abandons_code() {
    let repository = Arc::new(common::FlakyRepository::failing_inserts(1));
    let state = common::state_with(repository.clone());
    let server = server(state);

    let failed = server
        .post("/api/shorturl")
        .form(&[("url", "https://example.com")])
        .await;

    failed.assert_status_internal_server_error();
    failed.assert_json(&json!({ "error": "Database error" }));

    let next = server
        .post("/api/shorturl")
        .form(&[("url", "https://example.com")])
        .await;

    next.assert_status_ok();
    assert_eq!(next.json::<serde_json::Value>()["short_url"], 2);
    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_without_body() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let response = server.post("/api/shorturl").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "error": "invalid url" }));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_json_body_is_invalid_url() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "error": "invalid url" }));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_shorten_duplicate_url_field() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://a.example"), ("url", "https://b.example")])
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "error": "invalid url" }));
    assert_eq!(repo.count().await.unwrap(), 0);
}
