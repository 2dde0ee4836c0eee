//! API integration tests, driving the router in-process

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use booky_server::{api, repository::Repository, services::Services, AppConfig, AppState};

fn app() -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(Repository::in_memory())),
    };
    api::create_router(state)
}

/// Send one request and return the status and JSON body (Null when empty)
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri));
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("Failed to build request"))
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn create_fixtures(app: &Router) {
    let (status, _) = send(
        app,
        "POST",
        "/books",
        Some(json!({
            "ISBN": "12345Book",
            "title": "Tesla!!!",
            "category": ["tech", "space", "education"],
            "language": ["en"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(app, "POST", "/authors", Some(json!({ "id": 1, "name": "pavan" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/publications",
        Some(json!({ "id": 10, "name": "writex" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_counts() {
    let app = app();
    create_fixtures(&app).await;

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 1);
    assert_eq!(body["authors"], 1);
    assert_eq!(body["publications"], 1);
}

#[tokio::test]
async fn test_list_and_lookup_books() {
    let app = app();
    create_fixtures(&app).await;

    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, "GET", "/books/12345Book", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["title"], "Tesla!!!");
    assert_eq!(body["book"]["categories"], json!(["tech", "space", "education"]));

    let (status, body) = send(&app, "GET", "/categories/space/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"][0]["isbn"], "12345Book");

    let (status, body) = send(&app, "GET", "/languages/en/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"][0]["isbn"], "12345Book");
}

#[tokio::test]
async fn test_empty_lookups_are_not_found() {
    let app = app();
    create_fixtures(&app).await;

    let (status, body) = send(&app, "GET", "/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No book found for the ISBN of 999");

    let (status, _) = send(&app, "GET", "/categories/cooking/books", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/books/12345Book/authors", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/authors/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejections() {
    let app = app();
    create_fixtures(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "isbn": "12345Book", "title": "Again" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Duplicate");

    let (status, _) = send(&app, "POST", "/books", Some(json!({ "title": "No ISBN" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/books",
        Some(json!({ "isbn": "777", "title": "Linked", "authors": [1] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/authors", Some(json!({ "name": "anonymous" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_author_relationship_round() {
    let app = app();
    create_fixtures(&app).await;

    let (status, body) = send(&app, "PUT", "/books/12345Book/authors/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["authors"], json!([1]));
    assert_eq!(body["author"]["books"], json!(["12345Book"]));

    let (status, body) = send(&app, "GET", "/books/12345Book/authors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authors"][0]["name"], "pavan");

    let (status, body) = send(&app, "GET", "/authors/1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"][0]["isbn"], "12345Book");

    let (status, _) = send(&app, "DELETE", "/authors/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/books/12345Book", None).await;
    assert_eq!(body["book"]["authors"], json!([]));

    let (_, body) = send(&app, "GET", "/catalog/audit", None).await;
    assert_eq!(body["consistent"], true);
}

#[tokio::test]
async fn test_detach_unlinked_author_is_ok() {
    let app = app();
    create_fixtures(&app).await;

    let (status, body) = send(&app, "DELETE", "/books/12345Book/authors/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["authors"], json!([]));
    assert_eq!(body["author"]["books"], json!([]));
}

#[tokio::test]
async fn test_publication_relationship_round() {
    let app = app();
    create_fixtures(&app).await;

    let (status, body) = send(&app, "PUT", "/books/12345Book/publication/10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["publication"], 10);
    assert_eq!(body["publication"]["books"], json!(["12345Book"]));

    // idempotent
    let (_, body) = send(&app, "PUT", "/books/12345Book/publication/10", None).await;
    assert_eq!(body["publication"]["books"], json!(["12345Book"]));

    let (status, body) = send(&app, "GET", "/publications/10/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"][0]["isbn"], "12345Book");

    let (status, _) = send(&app, "DELETE", "/books/12345Book", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/publications/10", None).await;
    assert_eq!(body["publication"]["books"], json!([]));
}

#[tokio::test]
async fn test_attach_missing_book_is_not_found() {
    let app = app();
    create_fixtures(&app).await;

    let (status, body) = send(&app, "PUT", "/books/999/publication/10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchEntity");

    let (_, body) = send(&app, "GET", "/publications/10", None).await;
    assert_eq!(body["publication"]["books"], json!([]));
}

#[tokio::test]
async fn test_delete_missing_book_is_not_found() {
    let app = app();
    let (status, _) = send(&app, "DELETE", "/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
