use crate::{api, create_app, Config};
use atelier_taxonomy::DbState;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        port: 4001,
        host: "127.0.0.1".parse().unwrap(),
        cors_origin: "http://localhost:3000".to_string(),
        database_path: "unused.db".into(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let db = DbState::in_memory().await.unwrap();
    let app = api::create_router(db);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_status_endpoint_reports_database() {
    let db = DbState::in_memory().await.unwrap();
    let app = api::create_router(db);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/status")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["database"], "connected");
}

#[tokio::test]
async fn test_taxonomy_routes_are_mounted() {
    let db = DbState::in_memory().await.unwrap();
    let app = create_app(db, &test_config()).unwrap();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/project-types")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": "Website" }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/project-types")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let list = body_json(response).await;
    assert_eq!(list[0]["name"], "Website");
}

#[tokio::test]
async fn test_invalid_endpoint() {
    let db = DbState::in_memory().await.unwrap();
    let app = create_app(db, &test_config()).unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/nonexistent")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let db = DbState::in_memory().await.unwrap();
    let app = create_app(db, &test_config()).unwrap();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/project-types")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}
