mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum_test::TestServer;
use tinylink::routes::{api_router, app_router};
use tower::ServiceExt;

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let state = common::create_test_state();
    let token = state.store.insert("https://example.com/slash".to_string());
    let app = app_router(state, &[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{token}/"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"https://example.com/slash");
}

#[tokio::test]
async fn test_full_router_create_and_resolve() {
    let app = app_router(common::create_test_state(), &[]);

    let created = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/?url=https%3A%2F%2Fexample.com%2Fpath%3Fq%3D1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    let token = to_bytes(created.into_body(), usize::MAX).await.unwrap();
    let token = String::from_utf8(token.to_vec()).unwrap();

    let resolved = app
        .oneshot(
            Request::builder()
                .uri(format!("/{token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resolved.status(), StatusCode::OK);
    assert_eq!(
        resolved.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let body = to_bytes(resolved.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"https://example.com/path?q=1");
}

#[tokio::test]
async fn test_cors_allowed_origin() {
    let state = common::create_test_state();
    let token = state.store.insert("https://example.com/".to_string());
    let origins = vec![
        "https://app.example.com".to_string(),
        "https://admin.example.com".to_string(),
    ];
    let server = TestServer::new(api_router(state, &origins)).unwrap();

    let response = server
        .get(&format!("/{token}"))
        .add_header("Origin", "https://admin.example.com")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("access-control-allow-origin"),
        "https://admin.example.com"
    );
}

#[tokio::test]
async fn test_cors_disallowed_origin() {
    let state = common::create_test_state();
    let token = state.store.insert("https://example.com/".to_string());
    let origins = vec!["https://app.example.com".to_string()];
    let server = TestServer::new(api_router(state, &origins)).unwrap();

    let response = server
        .get(&format!("/{token}"))
        .add_header("Origin", "https://evil.example.net")
        .await;

    response.assert_status_ok();
    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn test_cors_disabled_without_origins() {
    let state = common::create_test_state();
    let token = state.store.insert("https://example.com/".to_string());
    let server = common::test_server(state);

    let response = server
        .get(&format!("/{token}"))
        .add_header("Origin", "https://app.example.com")
        .await;

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn test_get_root_is_not_a_token() {
    let server = common::test_server(common::create_test_state());

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}
