//! API tests against an in-process router backed by the in-memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use campus_catalog_server::{
    api,
    repository::{BookStore, MemoryBookStore},
    AppConfig, AppState,
};

const BOUNDARY: &str = "catalog-test-boundary";

fn app() -> (Router, Arc<MemoryBookStore>) {
    let store = Arc::new(MemoryBookStore::new());
    let shared: Arc<dyn BookStore> = store.clone();
    let state = AppState::new(AppConfig::default(), shared);
    (api::create_router(state), store)
}

/// Send a request and decode the JSON response body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn upload(field: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/books/import")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_departments_come_from_the_store() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/v1/departments")).await;

    assert_eq!(status, StatusCode::OK);
    let codes = body.as_array().expect("array of codes");
    assert_eq!(codes.len(), 24);
    assert!(codes.contains(&Value::from("B.COM")));
    assert!(codes.contains(&Value::from("AGRICULTURE")));
}

#[tokio::test]
async fn test_import_then_browse() {
    let (app, store) = app();
    let csv = b"Title,Dept,Acc\nDS,cs,A1\nds,CSE,A2\n,CSE,A3\n";

    let (status, report) = send(&app, upload("file", "books.csv", csv)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["success"], true);
    assert_eq!(report["totalRows"], 3);
    assert_eq!(report["validRows"], 2);
    assert_eq!(report["inserted"], 1);
    assert_eq!(report["updated"], 0);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["errors"][0], "Row 4: missing title");
    assert_eq!(store.len().await, 1);

    let (status, page) = send(&app, get("/api/v1/books?q=ds")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    let id = page["books"][0]["id"].as_i64().unwrap();

    let (status, book) = send(&app, get(&format!("/api/v1/books/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "DS");
    assert_eq!(book["department"], "CSE");
    assert_eq!(book["copies"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_nothing_imported_is_reported_not_errored() {
    let (app, _) = app();
    let csv = b"Title,Dept\nDS,XYZ\n";

    let (status, report) = send(&app, upload("file", "books.csv", csv)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["success"], false);
    assert_eq!(report["message"], "No books were imported");
}

#[tokio::test]
async fn test_placeholder_department_is_reported_as_invalid() {
    let (app, store) = app();
    let csv = b"Title,Dept\nDS,--\nOS\n";

    let (status, report) = send(&app, upload("file", "books.csv", csv)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["errors"][0], "Row 2: invalid department \"--\"");
    assert_eq!(report["errors"][1], "Row 3: missing department");
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_unreadable_upload_is_bad_request() {
    let (app, _) = app();

    let (status, report) = send(&app, upload("file", "books.xlsx", b"not a workbook")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(report["success"], false);
    assert!(report["message"].as_str().unwrap().starts_with("Unable to read spreadsheet"));

    let (status, report) = send(&app, upload("file", "books.csv", b"Title,Dept\n")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(report["message"], "Spreadsheet contains no data rows");
}

#[tokio::test]
async fn test_missing_file_field() {
    let (app, _) = app();
    let (status, body) = send(&app, upload("attachment", "books.csv", b"Title\nDS\n")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No file uploaded");
}

#[tokio::test]
async fn test_unknown_book_and_bad_pagination() {
    let (app, _) = app();

    let (status, body) = send(&app, get("/api/v1/books/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");

    let (status, _) = send(&app, get("/api/v1/books?per_page=500")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_huge_page_is_rejected() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        get("/api/v1/books?page=9223372036854775807&per_page=100"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}
