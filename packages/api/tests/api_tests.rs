// ABOUTME: Router-level tests for the taxonomy REST API
// ABOUTME: Drives the axum router with oneshot requests against an in-memory database

use atelier_api::create_api_router;
use atelier_taxonomy::DbState;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn create_test_app() -> Router {
    let db = DbState::in_memory().await.unwrap();
    create_api_router(db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_project_type(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/project-types",
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_website_scenario_over_http() {
    let app = create_test_app().await;

    let website = create_project_type(&app, "Website").await;
    assert_eq!(website["tagTypes"], json!([]));
    let website_id = website["id"].as_str().unwrap().to_string();

    let (status, industry) = send(
        &app,
        Method::POST,
        &format!("/api/project-types/{}/tag-types", website_id),
        Some(json!({ "name": "Industry", "color": "#228B22" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(industry["projectTypeId"], json!(website_id));
    assert_eq!(industry["tags"], json!([]));
    let industry_id = industry["id"].as_str().unwrap().to_string();

    let (status, refreshed) = send(
        &app,
        Method::POST,
        &format!(
            "/api/project-types/{}/tag-types/{}/tags",
            website_id, industry_id
        ),
        Some(json!({ "name": "Healthcare" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["id"], json!(industry_id));
    assert_eq!(refreshed["tags"].as_array().unwrap().len(), 1);

    let (status, fetched) = send(
        &app,
        Method::GET,
        &format!("/api/project-types/{}", website_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let tag_types = fetched["tagTypes"].as_array().unwrap();
    assert_eq!(tag_types.len(), 1);
    assert_eq!(tag_types[0]["color"], "#228B22");

    let tags = tag_types[0]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "Healthcare");
    assert!(tags[0].get("color").is_none());
}

#[tokio::test]
async fn test_list_project_types_includes_two_levels() {
    let app = create_test_app().await;
    let website = create_project_type(&app, "Website").await;
    let website_id = website["id"].as_str().unwrap();

    let (_, tag_type) = send(
        &app,
        Method::POST,
        &format!("/api/project-types/{}/tag-types", website_id),
        Some(json!({ "name": "Industry", "color": "#228B22" })),
    )
    .await;
    send(
        &app,
        Method::POST,
        &format!(
            "/api/project-types/{}/tag-types/{}/tags",
            website_id,
            tag_type["id"].as_str().unwrap()
        ),
        Some(json!({ "name": "Retail", "color": "#ff0000" })),
    )
    .await;

    let (status, list) = send(&app, Method::GET, "/api/project-types", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["tagTypes"][0]["tags"][0]["color"], "#ff0000");
}

#[tokio::test]
async fn test_validation_errors_return_400() {
    let app = create_test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tag-types",
        Some(json!({ "name": "", "color": "#FFFFFF" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name is required"));

    // Missing fields fail validation rather than deserialization
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tag-types",
        Some(json!({ "name": "Industry" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("color is required"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/project-types",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/api/tag-types", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_not_found_at_any_level_of_the_path() {
    let app = create_test_app().await;
    let website = create_project_type(&app, "Website").await;
    let branding = create_project_type(&app, "Branding").await;
    let website_id = website["id"].as_str().unwrap();
    let branding_id = branding["id"].as_str().unwrap();

    let (_, tag_type) = send(
        &app,
        Method::POST,
        &format!("/api/project-types/{}/tag-types", website_id),
        Some(json!({ "name": "Industry", "color": "#228B22" })),
    )
    .await;
    let tag_type_id = tag_type["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/project-types/pt-missing",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Project type not found" }));

    // Tag type exists, but under a different project type
    let (status, _) = send(
        &app,
        Method::POST,
        &format!(
            "/api/project-types/{}/tag-types/{}/tags",
            branding_id, tag_type_id
        ),
        Some(json!({ "name": "Healthcare" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/tag-types/tt-missing/tags",
        Some(json!({ "name": "Healthcare" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/tag-types/{}/tags/tag-missing", tag_type_id),
        Some(json!({ "name": "Healthcare" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing was written by the failed calls
    let (_, fetched) = send(
        &app,
        Method::GET,
        &format!("/api/tag-types/{}", tag_type_id),
        None,
    )
    .await;
    assert_eq!(fetched["tags"], json!([]));
}

#[tokio::test]
async fn test_delete_tag_type_then_direct_tag_fetch_is_404() {
    let app = create_test_app().await;
    let website = create_project_type(&app, "Website").await;
    let website_id = website["id"].as_str().unwrap();

    let (_, tag_type) = send(
        &app,
        Method::POST,
        &format!("/api/project-types/{}/tag-types", website_id),
        Some(json!({ "name": "Industry", "color": "#228B22" })),
    )
    .await;
    let tag_type_id = tag_type["id"].as_str().unwrap();

    let (_, with_tag) = send(
        &app,
        Method::POST,
        &format!("/api/tag-types/{}/tags", tag_type_id),
        Some(json!({ "name": "Healthcare" })),
    )
    .await;
    let tag_id = with_tag["tags"][0]["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::GET,
        &format!(
            "/api/project-types/{}/tag-types/{}/tags/{}",
            website_id, tag_type_id, tag_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/project-types/{}/tag-types/{}", website_id, tag_type_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, list) = send(
        &app,
        Method::GET,
        &format!("/api/project-types/{}/tag-types", website_id),
        None,
    )
    .await;
    assert_eq!(list, json!([]));

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/tag-types/{}/tags/{}", tag_type_id, tag_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tag_update_and_delete_return_parent() {
    let app = create_test_app().await;

    let (_, tag_type) = send(
        &app,
        Method::POST,
        "/api/tag-types",
        Some(json!({ "name": "Audience", "color": "#1e40af" })),
    )
    .await;
    let tag_type_id = tag_type["id"].as_str().unwrap();
    assert!(tag_type["projectTypeId"].is_null());

    let (_, with_tag) = send(
        &app,
        Method::POST,
        &format!("/api/tag-types/{}/tags", tag_type_id),
        Some(json!({ "name": "Students" })),
    )
    .await;
    let tag_id = with_tag["tags"][0]["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/tag-types/{}/tags/{}", tag_type_id, tag_id),
        Some(json!({ "name": "Teachers", "color": "#ABCDEF" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(tag_type_id));
    assert_eq!(updated["tags"][0]["name"], "Teachers");
    assert_eq!(updated["tags"][0]["color"], "#ABCDEF");

    let (status, after_delete) = send(
        &app,
        Method::DELETE,
        &format!("/api/tag-types/{}/tags/{}", tag_type_id, tag_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after_delete["id"], json!(tag_type_id));
    assert_eq!(after_delete["tags"], json!([]));

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/tag-types/{}/tags/{}", tag_type_id, tag_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_project_type_cascades_over_http() {
    let app = create_test_app().await;
    let website = create_project_type(&app, "Website").await;
    let website_id = website["id"].as_str().unwrap();

    let (_, tag_type) = send(
        &app,
        Method::POST,
        &format!("/api/project-types/{}/tag-types", website_id),
        Some(json!({ "name": "Industry", "color": "#228B22" })),
    )
    .await;
    let tag_type_id = tag_type["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/project-types/{}", website_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/tag-types/{}", tag_type_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, Method::GET, "/api/project-types", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_describe_color() {
    let app = create_test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/colors/FFFFFF", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hex"], "#ffffff");
    assert_eq!(body["contrast"], "#000000");
    assert_eq!(body["hsv"]["v"], json!(1.0));

    let (status, body) = send(&app, Method::GET, "/api/colors/zzz", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid color"));
}

async fn send_raw(
    app: &Router,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/project-types");
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).expect("error body should be JSON");
    (status, value)
}

#[tokio::test]
async fn test_wrongly_typed_body_is_a_json_bad_request() {
    let app = create_test_app().await;

    let (status, body) = send_raw(&app, Some("application/json"), r#"{"name": 5}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_truncated_body_is_a_json_bad_request() {
    let app = create_test_app().await;

    let (status, body) = send_raw(&app, Some("application/json"), r#"{"name": "Web"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_missing_content_type_is_a_json_bad_request() {
    let app = create_test_app().await;

    let (status, body) = send_raw(&app, None, r#"{"name": "Website"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.contains("Content-Type")));

    let (_, listed) = send(&app, Method::GET, "/api/project-types", None).await;
    assert_eq!(listed, json!([]));
}
