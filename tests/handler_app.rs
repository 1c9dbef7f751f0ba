mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::ConnectInfo;
use axum::http::{HeaderValue, Request, StatusCode, header};
use axum::response::Response;
use short_url_service::api::middleware::rate_limit::SHORTEN_BURST;
use short_url_service::domain::entities::{NewMapping, ShortCode};
use short_url_service::domain::repositories::MappingRepository;
use short_url_service::infrastructure::persistence::InMemoryMappingRepository;
use short_url_service::routes::app_router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower::{Service, ServiceExt};
use tower_http::normalize_path::NormalizePath;

fn app() -> (NormalizePath<Router>, Arc<InMemoryMappingRepository>) {
    let (state, repo) = common::create_test_state();
    (app_router(state, Path::new("public"), Path::new("views")), repo)
}

/// Attaches the peer address the server would record via connect info.
fn request(method: &str, uri: &str, body: Body) -> Request<Body> {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
    request
}

fn form_post(url: &str) -> Request<Body> {
    let mut request = request("POST", "/api/shorturl", Body::from(format!("url={url}")));
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    request
}

async fn send(app: &mut NormalizePath<Router>, request: Request<Body>) -> Response {
    ServiceExt::<Request<Body>>::ready(app).await.unwrap().call(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_page_served() {
    let (mut app, _repo) = app();

    let response = send(&mut app, request("GET", "/", Body::empty())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let body = body_text(response).await;
    assert!(body.contains(r#"action="/api/shorturl""#));
}

#[tokio::test]
async fn test_public_assets_served() {
    let (mut app, _repo) = app();

    let response = send(&mut app, request("GET", "/public/style.css", Body::empty())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (mut app, _repo) = app();

    let mut req = request("GET", "/health", Body::empty());
    req.headers_mut()
        .insert(header::ORIGIN, HeaderValue::from_static("https://client.example"));
    let response = send(&mut app, req).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (mut app, repo) = app();
    repo.insert(NewMapping {
        code: ShortCode::new(1).unwrap(),
        original_url: "https://example.com/".to_string(),
    })
    .await
    .unwrap();

    let response = send(&mut app, request("GET", "/api/shorturl/1/", Body::empty())).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "https://example.com/");
}

#[tokio::test]
async fn test_shorten_through_full_router() {
    let (mut app, _repo) = app();

    let response = send(&mut app, form_post("https%3A%2F%2Fexample.com")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "original_url": "https://example.com", "short_url": 1 })
    );
}

#[tokio::test]
async fn test_submissions_rate_limited_after_burst() {
    let (mut app, _repo) = app();

    for _ in 0..SHORTEN_BURST {
        let response = send(&mut app, form_post("not+a+url")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let mut limited = false;
    for _ in 0..SHORTEN_BURST {
        let response = send(&mut app, form_post("not+a+url")).await;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            limited = true;
            break;
        }
    }
    assert!(limited);
}

#[tokio::test]
async fn test_redirects_not_rate_limited() {
    let (mut app, _repo) = app();

    for _ in 0..(SHORTEN_BURST + 10) {
        let response = send(&mut app, request("GET", "/api/shorturl/99", Body::empty())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
